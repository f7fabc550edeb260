//! Rotation pivot resolution
//!
//! The pivot for node rotation is the midpoint of the node's local-space
//! vertex bounding box. It is recomputed fresh on every rotation interaction
//! rather than cached, so it stays correct if geometry changes between
//! interactions.

use cgmath::Vector3;

use crate::gfx::scene::node::SceneNode;

/// Computes the axis-aligned bounding-box midpoint of the node's geometry.
///
/// A node without any vertices yields the origin and a warning; the
/// interaction proceeds with `(0, 0, 0)` as pivot.
pub fn bounding_box_pivot(node: &SceneNode) -> Vector3<f32> {
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    let mut has_vertices = false;

    for mesh in &node.meshes {
        for position in mesh.positions() {
            has_vertices = true;
            for axis in 0..3 {
                min[axis] = min[axis].min(position[axis]);
                max[axis] = max[axis].max(position[axis]);
            }
        }
    }

    if !has_vertices {
        log::warn!("node '{}' has no geometry; rotating about the origin", node.name);
        return Vector3::new(0.0, 0.0, 0.0);
    }

    Vector3::new(
        (min[0] + max[0]) * 0.5,
        (min[1] + max[1]) * 0.5,
        (min[2] + max[2]) * 0.5,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::node::Mesh;

    /// Flat position triples for a unit cube's eight corners around `center`.
    pub(crate) fn cube_positions(center: [f32; 3]) -> Vec<f32> {
        let mut positions = Vec::with_capacity(24);
        for dz in [-0.5f32, 0.5] {
            for dy in [-0.5f32, 0.5] {
                for dx in [-0.5f32, 0.5] {
                    positions.extend_from_slice(&[
                        center[0] + dx,
                        center[1] + dy,
                        center[2] + dz,
                    ]);
                }
            }
        }
        positions
    }

    pub(crate) fn cube_node(center: [f32; 3]) -> SceneNode {
        let positions = cube_positions(center);
        let normals = vec![0.0; positions.len()];
        SceneNode::new(vec![Mesh::new(positions, normals, Vec::new())])
    }

    #[test]
    fn test_pivot_of_unit_cube() {
        let node = cube_node([1.0, 2.0, 3.0]);
        let pivot = bounding_box_pivot(&node);
        assert!((pivot - Vector3::new(1.0, 2.0, 3.0)).x.abs() < 1e-6);
        assert!((pivot.y - 2.0).abs() < 1e-6);
        assert!((pivot.z - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_pivot_spans_multiple_meshes() {
        let a = Mesh::new(vec![0.0, 0.0, 0.0], vec![0.0; 3], Vec::new());
        let b = Mesh::new(vec![2.0, 4.0, 6.0], vec![0.0; 3], Vec::new());
        let node = SceneNode::new(vec![a, b]);
        let pivot = bounding_box_pivot(&node);
        assert_eq!(pivot, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_empty_node_pivots_at_origin() {
        let node = SceneNode::new(Vec::new());
        assert_eq!(bounding_box_pivot(&node), Vector3::new(0.0, 0.0, 0.0));
    }
}
