//! Arcball-style viewer camera
//!
//! Holds the eye and center points plus everything derived from them: the
//! orthonormal view basis, the view matrix, and the GPU-facing uniform.
//! Derived state is rebuilt only through [`ArcballCamera::refresh`], which the
//! frame dispatcher calls when a controller reported a mutation. Frames with
//! no input leave the cached matrices untouched.

use cgmath::{perspective, InnerSpace, Matrix4, Rad, Vector3};

use super::basis::ViewBasis;
use super::manager::{convert_matrix4_to_array, CameraUniform};

/// Maps OpenGL clip space (z in [-1, 1]) to wgpu clip space (z in [0, 1]).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Default eye position on startup.
const DEFAULT_EYE: Vector3<f32> = Vector3::new(4.0, 3.0, 8.0);

/// Default look-at target on startup.
const DEFAULT_CENTER: Vector3<f32> = Vector3::new(0.0, 0.0, 0.0);

#[derive(Debug, Clone, Copy)]
pub struct ArcballCamera {
    /// Camera world position. Mutated by orbit and zoom.
    pub eye: Vector3<f32>,
    /// Look-at target and orbit pivot. Mutated by pan (together with eye).
    pub center: Vector3<f32>,
    basis: ViewBasis,
    view: Matrix4<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl ArcballCamera {
    /// Creates a camera looking from `eye` towards `center`.
    pub fn new(eye: Vector3<f32>, center: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            eye,
            center,
            basis: ViewBasis::from_eye_center(eye, center),
            view: Matrix4::from_scale(1.0),
            aspect,
            fovy: Rad(std::f32::consts::PI / 4.0),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        };
        camera.refresh();
        camera
    }

    /// Creates a camera with the viewer's default framing.
    pub fn with_defaults(aspect: f32) -> Self {
        Self::new(DEFAULT_EYE, DEFAULT_CENTER, aspect)
    }

    /// Moves the camera back to its default framing.
    pub fn reset(&mut self) {
        self.eye = DEFAULT_EYE;
        self.center = DEFAULT_CENTER;
        self.refresh();
    }

    /// The view frame derived from the last refresh.
    pub fn basis(&self) -> &ViewBasis {
        &self.basis
    }

    /// The view matrix derived from the last refresh.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view
    }

    /// Distance from eye to the orbit center.
    pub fn distance(&self) -> f32 {
        (self.eye - self.center).magnitude()
    }

    /// Rebuilds basis, view matrix, and uniform after an eye/center change.
    ///
    /// Order matters: the basis must be recomputed first because the view
    /// matrix is assembled from it, and the next frame's pan/orbit math reads
    /// the refreshed right/up axes.
    pub fn refresh(&mut self) {
        self.basis = ViewBasis::from_eye_center(self.eye, self.center);
        self.view = self.build_view_matrix();
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }

    /// Updates the projection aspect ratio and refreshes derived state.
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.refresh();
    }

    /// Look-at matrix assembled from the guarded basis.
    ///
    /// Equivalent to `Matrix4::look_at_rh` for regular orientations, but
    /// inherits the basis fallback so the matrix stays finite when the eye
    /// passes directly over the center.
    fn build_view_matrix(&self) -> Matrix4<f32> {
        let ViewBasis { forward, right, up } = self.basis;
        let eye = self.eye;
        #[rustfmt::skip]
        let view = Matrix4::new(
            right.x, up.x, forward.x, 0.0,
            right.y, up.y, forward.y, 0.0,
            right.z, up.z, forward.z, 0.0,
            -right.dot(eye), -up.dot(eye), -forward.dot(eye), 1.0,
        );
        view
    }

    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let proj = OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * self.view
    }
}

impl Default for ArcballCamera {
    fn default() -> Self {
        Self::with_defaults(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    const EPS: f32 = 1e-4;

    fn assert_mat4_near(a: Matrix4<f32>, b: Matrix4<f32>) {
        let a: [[f32; 4]; 4] = a.into();
        let b: [[f32; 4]; 4] = b.into();
        for col in 0..4 {
            for row in 0..4 {
                assert!(
                    (a[col][row] - b[col][row]).abs() < EPS,
                    "matrices differ at [{}][{}]: {} vs {}",
                    col,
                    row,
                    a[col][row],
                    b[col][row]
                );
            }
        }
    }

    #[test]
    fn test_view_matrix_matches_look_at() {
        let eye = Vector3::new(3.0, 2.0, 5.0);
        let center = Vector3::new(0.5, -0.5, 1.0);
        let camera = ArcballCamera::new(eye, center, 1.5);

        let reference = Matrix4::look_at_rh(
            Point3::new(eye.x, eye.y, eye.z),
            Point3::new(center.x, center.y, center.z),
            Vector3::unit_y(),
        );
        assert_mat4_near(camera.view_matrix(), reference);
    }

    #[test]
    fn test_view_matrix_finite_at_pole() {
        let camera = ArcballCamera::new(
            Vector3::new(0.0, 5.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
            1.0,
        );
        let m: [[f32; 4]; 4] = camera.view_matrix().into();
        for col in m {
            for v in col {
                assert!(v.is_finite());
            }
        }
    }

    #[test]
    fn test_refresh_updates_uniform() {
        let mut camera = ArcballCamera::with_defaults(1.0);
        camera.eye = Vector3::new(1.0, 2.0, 3.0);
        camera.refresh();
        assert_eq!(camera.uniform.view_position, [1.0, 2.0, 3.0, 1.0]);
    }
}
