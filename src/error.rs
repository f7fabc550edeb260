//! Viewer error types

use thiserror::Error;

/// Errors surfaced by the viewer library.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to load OBJ file '{path}': {source}")]
    ObjLoad {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("failed to create render surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found: {0}")]
    AdapterRequest(#[from] wgpu::RequestAdapterError),

    #[error("failed to acquire GPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),
}
