pub mod arcball;
pub mod basis;
pub mod controller;
pub mod manager;

// Re-export main types
pub use arcball::ArcballCamera;
pub use basis::ViewBasis;
pub use controller::CameraController;
pub use manager::{CameraManager, CameraUniform};
