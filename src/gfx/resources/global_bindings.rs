//! Global uniform bindings for camera and lighting
//!
//! Manages the per-frame uniform buffer shared by every draw call: camera
//! matrices plus the packed light array. Bound at slot 0 in the mesh
//! pipeline.

use crate::{
    gfx::camera::CameraUniform,
    gfx::scene::light::{pack_lights, GpuLight, Light, MAX_LIGHTS},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content. Must match the `Globals` struct in the
/// mesh shader exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUboContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    /// Accumulated ambient term, rgb; w unused.
    ambient: [f32; 4],
    /// x holds the active light count; remaining lanes pad to 16 bytes.
    counts: [u32; 4],
    lights: [GpuLight; MAX_LIGHTS],
}

/// Type alias for the global uniform buffer
pub type GlobalUbo = UniformBuffer<GlobalUboContent>;

/// Writes the frame's camera and light data into the global buffer.
///
/// The underlying [`UniformBuffer`] skips the GPU write when neither camera
/// nor lights changed since the previous frame.
pub fn update_global_ubo(
    ubo: &mut GlobalUbo,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lights: &[Light],
) {
    let (ambient, count, packed) = pack_lights(lights);
    let content = GlobalUboContent {
        view_position: camera.view_position,
        view_proj: camera.view_proj,
        ambient,
        counts: [count, 0, 0, 0],
        lights: packed,
    };
    ubo.update_content(queue, content);
}

/// Manages the bind group layout and bind group for global uniforms.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    /// Must be called once the uniform buffer exists, before rendering.
    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUbo) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Global Bind Group"),
        );
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// # Panics
    /// Panics if `create_bind_group()` hasn't been called yet
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}
