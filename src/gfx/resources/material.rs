//! Material definitions and centralized management
//!
//! Materials are stored in the [`MaterialManager`] and referenced by nodes
//! through string ids. Each material owns its GPU uniform buffer and bind
//! group; a default material backs nodes without an assignment.

use std::collections::HashMap;

use wgpu::Device;

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Material ID for referencing materials
pub type MaterialId = String;

/// GPU uniform data for materials. Must match the `Material` struct in the
/// mesh shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    _padding: [f32; 2],
}

type MaterialUbo = UniformBuffer<MaterialUniform>;

/// Fragment-stage bind group layout shared by all materials.
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
}

impl MaterialBindings {
    pub fn new(device: &Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .create(device, "Material Bind Group Layout");

        MaterialBindings { bind_group_layout }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    fn create_bind_group(&self, device: &Device, ubo: &MaterialUbo) -> wgpu::BindGroup {
        BindGroupBuilder::new(&self.bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Material Bind Group")
    }
}

/// A named surface material.
pub struct Material {
    pub name: MaterialId,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    gpu: Option<(MaterialUbo, wgpu::BindGroup)>,
}

impl Material {
    pub fn new(name: &str, base_color: [f32; 4], metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            metallic,
            roughness,
            gpu: None,
        }
    }

    fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            base_color: self.base_color,
            metallic: self.metallic,
            roughness: self.roughness,
            _padding: [0.0; 2],
        }
    }

    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu.as_ref().map(|(_, bind_group)| bind_group)
    }
}

/// Central material storage with a guaranteed default entry.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_id: MaterialId,
}

impl MaterialManager {
    pub fn new() -> Self {
        let default_id = MaterialId::from("default");
        let mut materials = HashMap::new();
        materials.insert(
            default_id.clone(),
            Material::new(&default_id, [0.8, 0.8, 0.8, 1.0], 0.0, 0.7),
        );
        Self {
            materials,
            default_id,
        }
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn get_material_mut(&mut self, id: &str) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    /// Resolves a node's material id, falling back to the default material.
    pub fn material_or_default(&self, id: Option<&str>) -> &Material {
        id.and_then(|id| self.materials.get(id))
            .unwrap_or_else(|| &self.materials[&self.default_id])
    }

    pub fn list_materials(&self) -> Vec<&MaterialId> {
        self.materials.keys().collect()
    }

    /// Creates or refreshes GPU buffers for every material.
    pub fn update_all_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        bindings: &MaterialBindings,
    ) {
        for material in self.materials.values_mut() {
            let content = material.uniform();
            match &mut material.gpu {
                Some((ubo, _)) => ubo.update_content(queue, content),
                None => {
                    let ubo = MaterialUbo::new_with_data(device, &content);
                    let bind_group = bindings.create_bind_group(device, &ubo);
                    material.gpu = Some((ubo, bind_group));
                }
            }
        }
    }
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}
