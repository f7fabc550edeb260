//! Scene management
//!
//! Scene graph (flat node list), mesh/vertex data, and lights.

pub mod light;
pub mod node;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use light::{Light, LightKind};
pub use node::{DrawNode, Mesh, SceneNode};
pub use scene::Scene;
pub use vertex::Vertex3D;
