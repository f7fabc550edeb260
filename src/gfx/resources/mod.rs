//! GPU resource management
//!
//! Materials, global uniforms, and texture resources shared by the
//! rendering pipeline.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, GlobalUbo};
pub use material::{Material, MaterialBindings, MaterialManager};
pub use texture_resource::TextureResource;
