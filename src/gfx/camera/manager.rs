//! Camera ownership and GPU uniform types

use cgmath::Matrix4;
use cgmath::SquareMatrix;

use super::{arcball::ArcballCamera, controller::CameraController};

/// Bundles the camera state with the controller that drives it.
pub struct CameraManager {
    pub camera: ArcballCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: ArcballCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }
}

/// GPU-facing camera data.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position in homogeneous coordinates.
    ///
    /// Homogeneous coordinates are used to fulfill the 16 byte alignment
    /// requirement.
    pub view_position: [f32; 4],

    /// The combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}
