//! View-space basis vectors
//!
//! Derives the orthonormal forward/right/up frame from the camera's eye and
//! center points. The basis is recomputed after every eye or center mutation
//! and consumed by both the camera controller (pan/orbit axes) and the node
//! controller (view-relative rotate/translate axes).

use cgmath::{InnerSpace, Vector3};

/// Fixed world-up reference used for basis derivation.
pub const WORLD_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

/// Fallback secondary axis used when the look direction is parallel to
/// [`WORLD_UP`] and the cross product degenerates to zero.
pub const WORLD_FORWARD: Vector3<f32> = Vector3::new(0.0, 0.0, 1.0);

/// Squared-length threshold below which a cross product counts as degenerate.
const DEGENERATE_EPSILON: f32 = 1e-8;

/// Orthonormal right-handed view frame.
///
/// `forward` points from the center towards the eye, `right` and `up` span
/// the view plane. All three are unit length and mutually orthogonal; they
/// are derived, never set independently.
#[derive(Debug, Clone, Copy)]
pub struct ViewBasis {
    pub forward: Vector3<f32>,
    pub right: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl ViewBasis {
    /// Derives the basis from an eye/center pair.
    ///
    /// When the look vector is collinear with the world up axis the naive
    /// `world_up x forward` cross product vanishes; in that case the fixed
    /// fallback axis [`WORLD_FORWARD`] is substituted before recomputing
    /// right and up, so orbiting through the pole stays finite.
    pub fn from_eye_center(eye: Vector3<f32>, center: Vector3<f32>) -> Self {
        let forward = (eye - center).normalize();

        let mut right = WORLD_UP.cross(forward);
        if right.magnitude2() < DEGENERATE_EPSILON {
            right = WORLD_FORWARD.cross(forward);
        }
        let right = right.normalize();
        let up = forward.cross(right).normalize();

        Self { forward, right, up }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(basis: &ViewBasis) {
        assert!((basis.forward.magnitude() - 1.0).abs() < EPS);
        assert!((basis.right.magnitude() - 1.0).abs() < EPS);
        assert!((basis.up.magnitude() - 1.0).abs() < EPS);
        assert!(basis.forward.dot(basis.right).abs() < EPS);
        assert!(basis.forward.dot(basis.up).abs() < EPS);
        assert!(basis.right.dot(basis.up).abs() < EPS);
    }

    #[test]
    fn test_basis_orthonormality() {
        let pairs = [
            (Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 0.0)),
            (Vector3::new(3.0, 2.0, 4.0), Vector3::new(1.0, -1.0, 0.5)),
            (Vector3::new(-7.0, 0.1, -2.0), Vector3::new(0.0, 0.0, 0.0)),
            (Vector3::new(0.5, -3.0, 0.5), Vector3::new(0.0, 1.0, 0.0)),
        ];

        for (eye, center) in pairs {
            let basis = ViewBasis::from_eye_center(eye, center);
            assert_orthonormal(&basis);
        }
    }

    #[test]
    fn test_basis_is_right_handed() {
        let basis = ViewBasis::from_eye_center(
            Vector3::new(0.0, 0.0, 5.0),
            Vector3::new(0.0, 0.0, 0.0),
        );
        // Looking down -z: forward = +z, right = +x, up = +y.
        assert!((basis.forward - Vector3::unit_z()).magnitude() < EPS);
        assert!((basis.right - Vector3::unit_x()).magnitude() < EPS);
        assert!((basis.up - Vector3::unit_y()).magnitude() < EPS);
    }

    #[test]
    fn test_degenerate_basis_is_finite() {
        // Eye directly above center: forward is parallel to world up.
        let basis = ViewBasis::from_eye_center(
            Vector3::new(0.0, 4.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
        );

        for v in [basis.forward, basis.right, basis.up] {
            assert!(v.x.is_finite() && v.y.is_finite() && v.z.is_finite());
        }
        assert_orthonormal(&basis);
    }

    #[test]
    fn test_degenerate_basis_below_pole() {
        let basis = ViewBasis::from_eye_center(
            Vector3::new(0.0, -4.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
        );
        assert_orthonormal(&basis);
    }
}
