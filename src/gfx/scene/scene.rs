//! Scene container
//!
//! Owns the camera, the flat list of scene nodes, the lights, and the
//! material store. Mesh loading goes through `tobj`; everything the
//! interactive controllers need (node transforms, camera state) lives here.

use cgmath::Vector3;
use wgpu::Device;

use crate::error::ViewerError;
use crate::gfx::camera::CameraManager;
use crate::gfx::resources::material::{Material, MaterialBindings, MaterialManager};

use super::light::Light;
use super::node::{Mesh, SceneNode};

/// Main scene containing nodes, lights, materials, and the camera.
pub struct Scene {
    pub camera_manager: CameraManager,
    pub nodes: Vec<SceneNode>,
    pub lights: Vec<Light>,
    pub material_manager: MaterialManager,
}

impl Scene {
    /// Creates a scene with the given camera and a default light rig:
    /// one ambient fill plus one directional key light.
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            nodes: Vec::new(),
            lights: vec![
                Light::ambient([1.0, 1.0, 1.0], 0.15),
                Light::directional([-0.4, -1.0, -0.3], [1.0, 1.0, 1.0], 1.0),
            ],
            material_manager: MaterialManager::new(),
        }
    }

    /// Adds a pre-built node, giving it a unique name, and returns its index.
    pub fn add_node(&mut self, mut node: SceneNode) -> usize {
        node.name = self.ensure_unique_name(&node.name);
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Loads a 3D object from an OBJ file with automatic material extraction.
    ///
    /// Loads geometry and materials from the OBJ/MTL pair and assigns
    /// materials based on the material ids in the OBJ file. Models without
    /// normals get smooth face normals computed for them.
    ///
    /// Returns the index of the newly added node.
    pub fn add_object(&mut self, object_path: &str) -> Result<usize, ViewerError> {
        let (models, materials) = tobj::load_obj(
            object_path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|source| ViewerError::ObjLoad {
            path: object_path.to_string(),
            source,
        })?;

        let materials = materials.unwrap_or_else(|_| {
            log::info!("no MTL file found for '{}', using default material", object_path);
            Vec::new()
        });

        for (i, mtl) in materials.iter().enumerate() {
            let material_name = if mtl.name.is_empty() {
                format!("material_{}", i)
            } else {
                mtl.name.clone()
            };

            if self.material_manager.get_material(&material_name).is_some() {
                continue;
            }

            let diffuse = mtl.diffuse.unwrap_or([0.8, 0.8, 0.8]);
            let material = Material::new(
                &material_name,
                [
                    diffuse[0],
                    diffuse[1],
                    diffuse[2],
                    mtl.dissolve.unwrap_or(1.0),
                ],
                0.0, // MTL has no direct metallic value
                1.0 - (mtl.shininess.unwrap_or(32.0) / 128.0).clamp(0.0, 1.0),
            );
            self.material_manager.add_material(material);
        }

        let mut meshes = Vec::new();
        for m in models.iter() {
            let mesh = &m.mesh;

            let normals = if !mesh.normals.is_empty() && mesh.normals.len() == mesh.positions.len()
            {
                mesh.normals.clone()
            } else {
                Mesh::calculate_face_normals(&mesh.positions, &mesh.indices)
            };

            meshes.push(Mesh::new(
                mesh.positions.clone(),
                normals,
                mesh.indices.clone(),
            ));
        }

        let mut node = SceneNode::new(meshes);

        if let Some(first_model) = models.first() {
            if !first_model.name.is_empty() {
                node.set_name(first_model.name.clone());
            }
            if let Some(material_id) = first_model.mesh.material_id {
                if material_id < materials.len() {
                    let material_name = if materials[material_id].name.is_empty() {
                        format!("material_{}", material_id)
                    } else {
                        materials[material_id].name.clone()
                    };
                    node.set_material(&material_name);
                }
            }
        }

        log::info!(
            "loaded '{}': {} meshes, {} vertices",
            object_path,
            node.meshes.len(),
            node.meshes.iter().map(|m| m.vertex_count()).sum::<u32>()
        );
        Ok(self.add_node(node))
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Initializes GPU resources for all nodes and materials.
    ///
    /// Must be called once the GPU context exists and before rendering.
    pub fn init_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        transform_layout: &wgpu::BindGroupLayout,
        material_bindings: &MaterialBindings,
    ) {
        for node in self.nodes.iter_mut() {
            if node.gpu_resources.is_none() {
                node.init_gpu_resources(device, transform_layout);
            }
        }
        self.material_manager
            .update_all_gpu_resources(device, queue, material_bindings);
    }

    /// Uploads one node's transform to the GPU after an interaction.
    pub fn upload_node_transform(&self, index: usize, queue: &wgpu::Queue) {
        if let Some(node) = self.nodes.get(index) {
            node.upload_transform(queue);
        }
    }

    /// Resolves the material used to render a node.
    pub fn material_for_node(&self, node: &SceneNode) -> &Material {
        self.material_manager
            .material_or_default(node.material_id.as_deref())
    }

    // UI helper methods

    pub fn node_names(&self) -> Vec<String> {
        self.nodes.iter().map(|node| node.name.clone()).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn get_node(&self, index: usize) -> Option<&SceneNode> {
        self.nodes.get(index)
    }

    pub fn get_node_mut(&mut self, index: usize) -> Option<&mut SceneNode> {
        self.nodes.get_mut(index)
    }

    /// Frames the default camera on a world-space point of interest.
    pub fn look_at(&mut self, center: Vector3<f32>) {
        let camera = &mut self.camera_manager.camera;
        camera.center = center;
        camera.refresh();
    }

    fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();
        while self.nodes.iter().any(|node| node.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }
        test_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{ArcballCamera, CameraController};

    fn empty_scene() -> Scene {
        let camera = ArcballCamera::with_defaults(1.0);
        Scene::new(CameraManager::new(camera, CameraController::default()))
    }

    #[test]
    fn test_node_names_are_deduplicated() {
        let mut scene = empty_scene();
        for _ in 0..3 {
            let mut node = SceneNode::new(Vec::new());
            node.set_name("cube");
            scene.add_node(node);
        }
        let names = scene.node_names();
        assert_eq!(names, vec!["cube", "cube (1)", "cube (2)"]);
    }

    #[test]
    fn test_missing_obj_file_is_an_error() {
        let mut scene = empty_scene();
        let result = scene.add_object("/nonexistent/model.obj");
        assert!(result.is_err());
        assert_eq!(scene.node_count(), 0);
    }

    #[test]
    fn test_default_light_rig() {
        let scene = empty_scene();
        assert_eq!(scene.lights.len(), 2);
    }
}
