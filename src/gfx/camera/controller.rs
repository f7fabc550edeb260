//! Mouse-driven camera controller
//!
//! Converts the per-frame pointer snapshot into orbit/pan/zoom motion of the
//! camera's eye and center points. Branch selection is re-evaluated every
//! frame from the current button state; there is no persistent drag state.
//! Exactly one branch runs per frame:
//!
//! - secondary button (or scroll wheel): zoom along the view axis
//! - middle button, or primary + modifier: rigid pan of eye and center
//! - primary button: orbit the eye about the center
//!
//! Each branch that mutates the camera returns `true` so the caller can
//! rebuild the basis and view matrix once per frame. An idle frame returns
//! `false` and leaves the camera bit-identical.

use cgmath::{Matrix3, Rad};

use crate::gfx::camera::arcball::ArcballCamera;
use crate::gfx::camera::basis::WORLD_UP;
use crate::input::InputSnapshot;

pub struct CameraController {
    pub orbit_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    /// Zoom applied per accumulated scroll-wheel line.
    pub wheel_step: f32,
    /// The eye is not allowed to cross the center while zooming.
    pub min_distance: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(0.6, 2.0)
    }
}

impl CameraController {
    pub fn new(orbit_speed: f32, zoom_speed: f32) -> Self {
        Self {
            orbit_speed,
            pan_speed: 1.2,
            zoom_speed,
            wheel_step: 0.4,
            min_distance: 0.1,
        }
    }

    /// Runs the branch selected by this frame's input.
    ///
    /// Returns whether eye or center were mutated. The caller is responsible
    /// for calling [`ArcballCamera::refresh`] when this returns `true`.
    pub fn update(&self, camera: &mut ArcballCamera, input: &InputSnapshot, dt: f32) -> bool {
        let (dx, dy) = input.cursor_delta;

        if input.secondary || input.scroll != 0.0 {
            self.zoom(camera, dy, input.scroll, dt)
        } else if input.middle || (input.primary && input.modifier) {
            self.pan(camera, dx, dy, dt)
        } else if input.primary {
            self.orbit(camera, dx, dy, dt)
        } else {
            false
        }
    }

    /// Moves the eye along the view axis; the center stays put.
    fn zoom(&self, camera: &mut ArcballCamera, dy: f32, scroll: f32, dt: f32) -> bool {
        let delta = dy * dt * self.zoom_speed + scroll * self.wheel_step;
        if delta == 0.0 {
            return false;
        }

        let forward = camera.basis().forward;
        let new_distance = camera.distance() + delta;
        if new_distance < self.min_distance {
            camera.eye = camera.center + forward * self.min_distance;
        } else {
            camera.eye += forward * delta;
        }
        true
    }

    /// Rotates the eye about the center: yaw about world up first, then
    /// pitch about the right axis sampled before either rotation applied.
    /// Rotating the offset vector preserves the orbit radius exactly.
    fn orbit(&self, camera: &mut ArcballCamera, dx: f32, dy: f32, dt: f32) -> bool {
        if dx == 0.0 && dy == 0.0 {
            return false;
        }

        let yaw = Rad(-dx * dt * self.orbit_speed);
        let pitch = Rad(-dy * dt * self.orbit_speed);
        let right = camera.basis().right;

        let mut offset = camera.eye - camera.center;
        offset = Matrix3::from_axis_angle(WORLD_UP, yaw) * offset;
        offset = Matrix3::from_axis_angle(right, pitch) * offset;
        camera.eye = camera.center + offset;
        true
    }

    /// Translates eye and center by the same view-plane vector, preserving
    /// orbit radius and look direction.
    fn pan(&self, camera: &mut ArcballCamera, dx: f32, dy: f32, dt: f32) -> bool {
        if dx == 0.0 && dy == 0.0 {
            return false;
        }

        let basis = camera.basis();
        let translation =
            basis.right * (-dx * dt * self.pan_speed) + basis.up * (dy * dt * self.pan_speed);
        camera.eye += translation;
        camera.center += translation;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3};

    const EPS: f32 = 1e-4;

    fn camera() -> ArcballCamera {
        ArcballCamera::new(
            Vector3::new(3.0, 2.0, 6.0),
            Vector3::new(0.0, 0.0, 0.0),
            1.0,
        )
    }

    fn drag(primary: bool, middle: bool, secondary: bool, modifier: bool, d: (f32, f32)) -> InputSnapshot {
        InputSnapshot {
            primary,
            middle,
            secondary,
            modifier,
            cursor_delta: d,
            scroll: 0.0,
        }
    }

    #[test]
    fn test_idle_frame_is_a_no_op() {
        let controller = CameraController::default();
        let mut cam = camera();
        let before_eye = cam.eye;
        let before_center = cam.center;

        let dirty = controller.update(&mut cam, &InputSnapshot::default(), 0.016);

        assert!(!dirty);
        assert_eq!(cam.eye, before_eye);
        assert_eq!(cam.center, before_center);
    }

    #[test]
    fn test_orbit_preserves_radius() {
        let controller = CameraController::default();
        let mut cam = camera();
        let radius = cam.distance();

        for delta in [(40.0, 0.0), (0.0, -25.0), (-13.0, 7.5), (100.0, 60.0)] {
            let dirty = controller.update(&mut cam, &drag(true, false, false, false, delta), 0.016);
            assert!(dirty);
            cam.refresh();
            assert!((cam.distance() - radius).abs() < EPS);
        }
    }

    #[test]
    fn test_orbit_moves_eye_not_center() {
        let controller = CameraController::default();
        let mut cam = camera();
        let center = cam.center;
        let eye = cam.eye;

        controller.update(&mut cam, &drag(true, false, false, false, (30.0, 10.0)), 0.016);

        assert_eq!(cam.center, center);
        assert!((cam.eye - eye).magnitude() > 0.0);
    }

    #[test]
    fn test_pan_is_rigid() {
        let controller = CameraController::default();
        let mut cam = camera();
        let radius = cam.distance();
        let forward = cam.basis().forward;
        let eye = cam.eye;
        let center = cam.center;

        let dirty = controller.update(&mut cam, &drag(false, true, false, false, (12.0, -8.0)), 0.016);
        assert!(dirty);

        let eye_shift = cam.eye - eye;
        let center_shift = cam.center - center;
        assert!((eye_shift - center_shift).magnitude() < EPS);
        assert!((cam.distance() - radius).abs() < EPS);

        cam.refresh();
        assert!((cam.basis().forward - forward).magnitude() < EPS);
    }

    #[test]
    fn test_primary_with_modifier_pans() {
        let controller = CameraController::default();
        let mut cam = camera();
        let center = cam.center;

        controller.update(&mut cam, &drag(true, false, false, true, (10.0, 0.0)), 0.016);

        // A pan moves the center; an orbit would have left it fixed.
        assert!((cam.center - center).magnitude() > 0.0);
    }

    #[test]
    fn test_zoom_moves_along_view_axis() {
        let controller = CameraController::default();
        let mut cam = camera();
        let center = cam.center;
        let forward = cam.basis().forward;
        let radius = cam.distance();

        // Negative vertical delta moves the eye towards the center.
        controller.update(&mut cam, &drag(false, false, true, false, (0.0, -20.0)), 0.016);

        assert_eq!(cam.center, center);
        assert!(cam.distance() < radius);
        cam.refresh();
        assert!((cam.basis().forward - forward).magnitude() < EPS);
    }

    #[test]
    fn test_zoom_clamps_at_min_distance() {
        let controller = CameraController::default();
        let mut cam = camera();

        // A huge delta would push the eye through the center.
        controller.update(
            &mut cam,
            &drag(false, false, true, false, (0.0, -10_000.0)),
            1.0,
        );

        assert!((cam.distance() - controller.min_distance).abs() < EPS);
    }

    #[test]
    fn test_scroll_zooms_without_buttons() {
        let controller = CameraController::default();
        let mut cam = camera();
        let radius = cam.distance();

        let input = InputSnapshot {
            scroll: -2.0,
            ..InputSnapshot::default()
        };
        let dirty = controller.update(&mut cam, &input, 0.016);

        assert!(dirty);
        assert!(cam.distance() < radius);
    }

    #[test]
    fn test_orbit_through_pole_stays_finite() {
        let controller = CameraController::default();
        let mut cam = ArcballCamera::new(
            Vector3::new(0.0, 0.1, 5.0),
            Vector3::new(0.0, 0.0, 0.0),
            1.0,
        );

        // Pitch far enough to cross directly over the center.
        for _ in 0..200 {
            controller.update(&mut cam, &drag(true, false, false, false, (0.0, -10.0)), 0.016);
            cam.refresh();
        }

        assert!(cam.eye.x.is_finite() && cam.eye.y.is_finite() && cam.eye.z.is_finite());
        let basis = cam.basis();
        assert!(basis.right.magnitude().is_finite());
        assert!((basis.right.magnitude() - 1.0).abs() < EPS);
    }
}
