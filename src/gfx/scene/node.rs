//! Scene nodes and mesh data
//!
//! A [`SceneNode`] owns its meshes and a local 4x4 transform. The transform
//! is set wholesale only at load time; afterwards it is mutated exclusively
//! through the node controller's composed scale/rotate/translate deltas.
//! GPU buffers are created lazily once a device is available.

use std::ops::Range;

use cgmath::{Matrix4, SquareMatrix};
use wgpu::Device;

use super::vertex::Vertex3D;

/// Triangle mesh with lazily created GPU buffers.
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    /// Builds a mesh from flat position/normal triples and an index list.
    pub fn new(positions: Vec<f32>, normals: Vec<f32>, indices: Vec<u32>) -> Self {
        let index_count = indices.len() as u32;

        let mut vertices = Vec::with_capacity(positions.len() / 3);
        for i in 0..positions.len() / 3 {
            vertices.push(Vertex3D {
                position: [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]],
                normal: [normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]],
            });
        }

        Self {
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Iterates over local-space vertex positions, used for pivot resolution.
    pub fn positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    /// Computes smooth per-vertex normals by averaging face normals.
    ///
    /// Used when an OBJ file ships without normals.
    pub fn calculate_face_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
        let vertex_count = positions.len() / 3;
        let mut normals = vec![0.0; positions.len()];
        let mut counts = vec![0u32; vertex_count];

        for triangle in indices.chunks(3) {
            let [i0, i1, i2] = [
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            ];

            let v = |i: usize| {
                [
                    positions[i * 3],
                    positions[i * 3 + 1],
                    positions[i * 3 + 2],
                ]
            };
            let (v0, v1, v2) = (v(i0), v(i1), v(i2));

            let edge1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
            let edge2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

            let face_normal = [
                edge1[1] * edge2[2] - edge1[2] * edge2[1],
                edge1[2] * edge2[0] - edge1[0] * edge2[2],
                edge1[0] * edge2[1] - edge1[1] * edge2[0],
            ];

            for &idx in &[i0, i1, i2] {
                normals[idx * 3] += face_normal[0];
                normals[idx * 3 + 1] += face_normal[1];
                normals[idx * 3 + 2] += face_normal[2];
                counts[idx] += 1;
            }
        }

        for i in 0..vertex_count {
            if counts[i] > 0 {
                let length = (normals[i * 3].powi(2)
                    + normals[i * 3 + 1].powi(2)
                    + normals[i * 3 + 2].powi(2))
                .sqrt();
                if length > 0.0 {
                    normals[i * 3] /= length;
                    normals[i * 3 + 1] /= length;
                    normals[i * 3 + 2] /= length;
                }
            }
        }

        normals
    }
}

/// GPU resources backing a node's transform uniform.
pub struct NodeGpuResources {
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

/// A transformable object in the scene.
pub struct SceneNode {
    pub name: String,
    pub meshes: Vec<Mesh>,
    /// Local transform. Mutated only through composed interaction deltas
    /// after load time.
    pub transform: Matrix4<f32>,
    pub visible: bool,
    /// Material id in the scene's material manager; `None` uses the default.
    pub material_id: Option<String>,
    pub gpu_resources: Option<NodeGpuResources>,
}

impl SceneNode {
    /// Creates a node with an identity transform.
    pub fn new(meshes: Vec<Mesh>) -> Self {
        Self {
            name: String::from("node"),
            meshes,
            transform: Matrix4::identity(),
            visible: true,
            material_id: None,
            gpu_resources: None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_material(&mut self, material_id: &str) {
        self.material_id = Some(material_id.to_string());
    }

    /// Replaces the local transform wholesale; load-time use only.
    pub fn set_transform(&mut self, transform: Matrix4<f32>) {
        self.transform = transform;
    }

    pub fn reset_transform(&mut self) {
        self.transform = Matrix4::identity();
    }

    /// Writes the current transform to the GPU uniform buffer, if created.
    pub fn upload_transform(&self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            // cgmath matrices are column-major, matching the shader layout.
            let transform_data: &[f32; 16] = self.transform.as_ref();
            queue.write_buffer(
                &gpu_resources.transform_buffer,
                0,
                bytemuck::cast_slice(transform_data),
            );
        }
    }

    pub fn transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }

    /// Creates vertex/index buffers and the transform uniform for this node.
    pub fn init_gpu_resources(&mut self, device: &Device, transform_layout: &wgpu::BindGroupLayout) {
        for mesh in self.meshes.iter_mut() {
            let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
                device,
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Vertex Buffer"),
                    contents: bytemuck::cast_slice(&mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                },
            );
            let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
                device,
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Index Buffer"),
                    contents: bytemuck::cast_slice(&mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                },
            );
            mesh.vertex_buffer = Some(vertex_buffer);
            mesh.index_buffer = Some(index_buffer);
        }

        let transform_data: &[f32; 16] = self.transform.as_ref();
        let transform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Node Transform Buffer"),
                contents: bytemuck::cast_slice(transform_data),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Node Transform Bind Group"),
            layout: transform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        self.gpu_resources = Some(NodeGpuResources {
            transform_buffer,
            transform_bind_group,
        });

        log::debug!("initialized GPU resources for node '{}'", self.name);
    }
}

/// Render-pass extension for drawing meshes and nodes.
pub trait DrawNode<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    fn draw_node(&mut self, node: &'a SceneNode);
}

impl<'a, 'b> DrawNode<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let (Some(vertex_buffer), Some(index_buffer)) =
            (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return; // Not uploaded yet
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }

    fn draw_node(&mut self, node: &'b SceneNode) {
        for mesh in &node.meshes {
            self.draw_mesh_instanced(mesh, 0..1);
        }
    }
}
