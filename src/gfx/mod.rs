//! Graphics module
//!
//! Camera, scene, GPU resources, and the wgpu render engine.

pub mod camera;
pub mod rendering;
pub mod resources;
pub mod scene;
