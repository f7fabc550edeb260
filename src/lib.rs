// src/lib.rs
//! Mirador 3D Viewer
//!
//! An interactive mesh viewer built on wgpu and winit. Mouse input drives
//! either the arcball camera or the selected scene node, switched from an
//! imgui panel.

pub mod app;
pub mod error;
pub mod gfx;
pub mod input;
pub mod interaction;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::ViewerApp;
pub use error::ViewerError;

/// Creates a default viewer application with logging initialized.
pub fn default() -> anyhow::Result<ViewerApp> {
    env_logger::init();
    ViewerApp::new()
}
