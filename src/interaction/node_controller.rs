//! Mouse-driven node transform controller
//!
//! Applies rotate/translate/scale deltas to the selected node's local
//! transform. Axes come from the camera's view basis so dragging feels the
//! same regardless of where the camera is; rotation signs match camera orbit.
//!
//! Deltas compose in a fixed order — scale, then rotate, then translate —
//! each pre-multiplying the existing transform:
//!
//! ```text
//! new_transform = translate * rotate * scale * old_transform
//! ```
//!
//! Only one of the three branches is active per frame; the other two
//! contribute identity matrices. The order is a behavioral contract:
//! reversing it produces visibly different, non-commutative results.

use cgmath::{Matrix4, Rad, SquareMatrix};

use crate::gfx::camera::ViewBasis;
use crate::gfx::scene::node::SceneNode;
use crate::input::InputSnapshot;

use super::pivot::bounding_box_pivot;

/// Lower bound on a single frame's scale factor; keeps a wild pointer
/// delta from collapsing or mirroring the node.
const MIN_SCALE_STEP: f32 = 1e-3;

pub struct NodeController {
    pub rotate_speed: f32,
    pub translate_speed: f32,
    pub scale_speed: f32,
}

impl Default for NodeController {
    fn default() -> Self {
        Self {
            rotate_speed: 0.6,
            translate_speed: 1.2,
            scale_speed: 1.0,
        }
    }
}

impl NodeController {
    /// Runs the branch selected by this frame's input against `node`.
    ///
    /// Returns whether the node's transform was mutated; the caller uses the
    /// flag to schedule the GPU transform upload. Idle input is a silent
    /// no-op.
    pub fn update(
        &self,
        node: &mut SceneNode,
        basis: &ViewBasis,
        input: &InputSnapshot,
        dt: f32,
    ) -> bool {
        let (dx, dy) = input.cursor_delta;

        let mut scale = Matrix4::identity();
        let mut rotate = Matrix4::identity();
        let mut translate = Matrix4::identity();
        let mut dirty = false;

        if input.secondary {
            // Uniform scale about the node's own local origin, not the pivot.
            let factor = (1.0 + dy * dt * self.scale_speed).max(MIN_SCALE_STEP);
            if factor != 1.0 {
                scale = Matrix4::from_scale(factor);
                dirty = true;
            }
        } else if input.middle || (input.primary && input.modifier) {
            if dx != 0.0 || dy != 0.0 {
                let v = basis.right * (-dx * dt * self.translate_speed)
                    + basis.up * (dy * dt * self.translate_speed);
                translate = Matrix4::from_translation(v);
                dirty = true;
            }
        } else if input.primary {
            if dx != 0.0 || dy != 0.0 {
                rotate = self.rotation_about_pivot(node, basis, dx, dy, dt);
                dirty = true;
            }
        }

        if dirty {
            node.transform = translate * rotate * scale * node.transform;
        }
        dirty
    }

    /// Builds the rotation-about-pivot matrix for this frame's drag.
    ///
    /// Reads as a point pipeline: translate(-pivot), rotate dx about the view
    /// up axis, rotate dy about the view right axis, translate(+pivot). The
    /// pivot is resolved fresh from the node's bounding box every time.
    fn rotation_about_pivot(
        &self,
        node: &SceneNode,
        basis: &ViewBasis,
        dx: f32,
        dy: f32,
        dt: f32,
    ) -> Matrix4<f32> {
        let pivot = bounding_box_pivot(node);
        let yaw = Rad(-dx * dt * self.rotate_speed);
        let pitch = Rad(-dy * dt * self.rotate_speed);

        Matrix4::from_translation(pivot)
            * Matrix4::from_axis_angle(basis.right, pitch)
            * Matrix4::from_axis_angle(basis.up, yaw)
            * Matrix4::from_translation(-pivot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::node::Mesh;
    use cgmath::{InnerSpace, Vector3, Vector4};

    const EPS: f32 = 1e-4;

    /// View basis of a camera on the +z axis: right = +x, up = +y.
    fn axis_basis() -> ViewBasis {
        ViewBasis::from_eye_center(Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 0.0))
    }

    fn cube_node(center: [f32; 3]) -> SceneNode {
        let mut positions = Vec::new();
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
        let normals = vec![0.0; positions.len()];
        SceneNode::new(vec![Mesh::new(positions, normals, Vec::new())])
    }

    fn snapshot(primary: bool, middle: bool, secondary: bool, modifier: bool, d: (f32, f32)) -> InputSnapshot {
        InputSnapshot {
            primary,
            middle,
            secondary,
            modifier,
            cursor_delta: d,
            scroll: 0.0,
        }
    }

    fn transform_point(m: Matrix4<f32>, p: Vector3<f32>) -> Vector3<f32> {
        let out = m * Vector4::new(p.x, p.y, p.z, 1.0);
        Vector3::new(out.x, out.y, out.z)
    }

    #[test]
    fn test_idle_input_is_a_silent_no_op() {
        let controller = NodeController::default();
        let mut node = cube_node([0.0; 3]);
        let before = node.transform;

        let dirty = controller.update(&mut node, &axis_basis(), &InputSnapshot::default(), 0.016);

        assert!(!dirty);
        assert_eq!(node.transform, before);
    }

    #[test]
    fn test_scale_is_about_local_origin() {
        let controller = NodeController::default();
        let mut node = cube_node([1.0, 2.0, 3.0]);

        // dy * dt * scale_speed = 1.0 -> factor 2.
        let dirty = controller.update(
            &mut node,
            &axis_basis(),
            &snapshot(false, false, true, false, (0.0, 1.0)),
            1.0,
        );
        assert!(dirty);

        // The local origin stays fixed, geometry doubles away from it.
        let origin = transform_point(node.transform, Vector3::new(0.0, 0.0, 0.0));
        assert!(origin.magnitude() < EPS);
        let p = transform_point(node.transform, Vector3::new(1.0, 2.0, 3.0));
        assert!((p - Vector3::new(2.0, 4.0, 6.0)).magnitude() < EPS);
    }

    #[test]
    fn test_rotation_keeps_pivot_world_position() {
        let controller = NodeController::default();
        let mut node = cube_node([1.0, 2.0, 3.0]);
        let pivot = Vector3::new(1.0, 2.0, 3.0);

        let dirty = controller.update(
            &mut node,
            &axis_basis(),
            &snapshot(true, false, false, false, (37.0, -12.0)),
            0.016,
        );
        assert!(dirty);

        let rotated_pivot = transform_point(node.transform, pivot);
        assert!((rotated_pivot - pivot).magnitude() < EPS);

        // Orientation did change: a corner moved.
        let corner = Vector3::new(1.5, 2.5, 3.5);
        let rotated_corner = transform_point(node.transform, corner);
        assert!((rotated_corner - corner).magnitude() > 1e-5);
    }

    #[test]
    fn test_translate_moves_along_view_plane() {
        let controller = NodeController::default();
        let mut node = cube_node([0.0; 3]);

        // dx = -1, dt = 1, speed 1.2 -> +1.2 along right (+x);
        // dy = 0.5 -> +0.6 along up (+y).
        let dirty = controller.update(
            &mut node,
            &axis_basis(),
            &snapshot(false, true, false, false, (-1.0, 0.5)),
            1.0,
        );
        assert!(dirty);

        let origin = transform_point(node.transform, Vector3::new(0.0, 0.0, 0.0));
        assert!((origin - Vector3::new(1.2, 0.6, 0.0)).magnitude() < EPS);
    }

    #[test]
    fn test_primary_with_modifier_translates() {
        let controller = NodeController::default();
        let mut node = cube_node([0.0; 3]);

        controller.update(
            &mut node,
            &axis_basis(),
            &snapshot(true, false, false, true, (-1.0, 0.0)),
            1.0,
        );

        // Pure translation: the unit x axis direction is unchanged.
        let dir = node.transform * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert!((Vector3::new(dir.x, dir.y, dir.z) - Vector3::unit_x()).magnitude() < EPS);
    }

    #[test]
    fn test_composition_order_is_translate_rotate_scale() {
        let controller = NodeController { rotate_speed: 1.0, translate_speed: 1.0, scale_speed: 1.0 };
        let basis = axis_basis();
        let mut node = cube_node([0.0; 3]);

        // Frame 1: scale by 2 (dy * dt * speed = 1).
        controller.update(&mut node, &basis, &snapshot(false, false, true, false, (0.0, 1.0)), 1.0);
        // Frame 2: rotate 90 degrees about the up axis (yaw = -dx * dt).
        let quarter_turn = std::f32::consts::FRAC_PI_2;
        controller.update(
            &mut node,
            &basis,
            &snapshot(true, false, false, false, (-quarter_turn, 0.0)),
            1.0,
        );
        // Frame 3: translate by (1, 0, 0) (dx = -1 along right).
        controller.update(&mut node, &basis, &snapshot(false, true, false, false, (-1.0, 0.0)), 1.0);

        // t * r * s applied to (1, 0, 0): scale -> (2, 0, 0),
        // +90 deg about y -> (0, 0, -2), translate -> (1, 0, -2).
        let p = transform_point(node.transform, Vector3::new(1.0, 0.0, 0.0));
        assert!((p - Vector3::new(1.0, 0.0, -2.0)).magnitude() < EPS);
    }
}
