//! # Interactive Transformation
//!
//! Converts per-frame pointer snapshots into manipulation of either the
//! camera or the selected scene node. The [`dispatcher`] picks exactly one
//! controller per frame from the manipulation mode; the [`node_controller`]
//! composes pivot-aware transform deltas; [`pivot`] resolves the rotation
//! anchor from node geometry. The camera side lives with the camera types in
//! [`crate::gfx::camera`].

pub mod dispatcher;
pub mod node_controller;
pub mod pivot;

// Re-export main types
pub use dispatcher::{FrameChanges, FrameDispatcher, ManipMode};
pub use node_controller::NodeController;
pub use pivot::bounding_box_pivot;
