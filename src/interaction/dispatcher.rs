//! Per-frame interaction dispatch
//!
//! Each frame exactly one controller runs, chosen by the manipulation mode
//! the UI exposes: camera mode drives the camera controller, scene-node mode
//! drives the node controller against the current selection. The returned
//! [`FrameChanges`] tells the caller which derived state must be pushed to
//! the GPU; a frame without mutations triggers no recomputation at all.

use crate::gfx::scene::Scene;
use crate::input::InputSnapshot;

use super::node_controller::NodeController;

/// Which subsystem mouse input manipulates this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManipMode {
    #[default]
    Camera,
    SceneNode,
}

/// Dirty flags produced by one frame's dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameChanges {
    /// The camera was mutated; its uniform must be re-uploaded.
    pub camera: bool,
    /// Index of the node whose transform was mutated, if any.
    pub node: Option<usize>,
}

/// Routes the per-frame input snapshot to the active controller.
pub struct FrameDispatcher {
    pub node_controller: NodeController,
}

impl Default for FrameDispatcher {
    fn default() -> Self {
        Self {
            node_controller: NodeController::default(),
        }
    }
}

impl FrameDispatcher {
    /// Runs one frame of interaction.
    ///
    /// In camera mode the camera controller runs and, when dirty, the
    /// camera's basis and view matrix are rebuilt (basis first). In
    /// scene-node mode the node controller runs against the selected node;
    /// no selection, or a stale index, is a silent no-op.
    pub fn dispatch(
        &self,
        scene: &mut Scene,
        mode: ManipMode,
        selected: Option<usize>,
        input: &InputSnapshot,
        dt: f32,
    ) -> FrameChanges {
        match mode {
            ManipMode::Camera => {
                let manager = &mut scene.camera_manager;
                let dirty = manager.controller.update(&mut manager.camera, input, dt);
                if dirty {
                    manager.camera.refresh();
                }
                FrameChanges {
                    camera: dirty,
                    node: None,
                }
            }
            ManipMode::SceneNode => {
                let Some(index) = selected else {
                    return FrameChanges::default();
                };
                let basis = *scene.camera_manager.camera.basis();
                let Some(node) = scene.nodes.get_mut(index) else {
                    return FrameChanges::default();
                };
                let dirty = self.node_controller.update(node, &basis, input, dt);
                FrameChanges {
                    camera: false,
                    node: dirty.then_some(index),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{ArcballCamera, CameraController, CameraManager};
    use crate::gfx::scene::node::{Mesh, SceneNode};
    use cgmath::Vector3;

    fn test_scene() -> Scene {
        let camera = ArcballCamera::new(
            Vector3::new(0.0, 0.0, 5.0),
            Vector3::new(0.0, 0.0, 0.0),
            1.0,
        );
        let manager = CameraManager::new(camera, CameraController::default());
        let mut scene = Scene::new(manager);

        let positions = vec![-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0];
        let normals = vec![0.0; 9];
        scene.add_node(SceneNode::new(vec![Mesh::new(positions, normals, vec![0, 1, 2])]));
        scene
    }

    fn drag_primary() -> InputSnapshot {
        InputSnapshot {
            primary: true,
            cursor_delta: (15.0, -4.0),
            ..InputSnapshot::default()
        }
    }

    #[test]
    fn test_camera_mode_never_touches_nodes() {
        let dispatcher = FrameDispatcher::default();
        let mut scene = test_scene();
        let node_transform = scene.nodes[0].transform;

        let changes = dispatcher.dispatch(&mut scene, ManipMode::Camera, Some(0), &drag_primary(), 0.016);

        assert!(changes.camera);
        assert_eq!(changes.node, None);
        assert_eq!(scene.nodes[0].transform, node_transform);
    }

    #[test]
    fn test_node_mode_never_touches_camera() {
        let dispatcher = FrameDispatcher::default();
        let mut scene = test_scene();
        let eye = scene.camera_manager.camera.eye;
        let node_transform = scene.nodes[0].transform;

        let changes =
            dispatcher.dispatch(&mut scene, ManipMode::SceneNode, Some(0), &drag_primary(), 0.016);

        assert!(!changes.camera);
        assert_eq!(changes.node, Some(0));
        assert_eq!(scene.camera_manager.camera.eye, eye);
        assert!(scene.nodes[0].transform != node_transform);
    }

    #[test]
    fn test_node_mode_without_selection_is_a_no_op() {
        let dispatcher = FrameDispatcher::default();
        let mut scene = test_scene();
        let node_transform = scene.nodes[0].transform;

        let changes = dispatcher.dispatch(&mut scene, ManipMode::SceneNode, None, &drag_primary(), 0.016);

        assert_eq!(changes, FrameChanges::default());
        assert_eq!(scene.nodes[0].transform, node_transform);
    }

    #[test]
    fn test_stale_selection_index_is_a_no_op() {
        let dispatcher = FrameDispatcher::default();
        let mut scene = test_scene();

        let changes = dispatcher.dispatch(&mut scene, ManipMode::SceneNode, Some(7), &drag_primary(), 0.016);

        assert_eq!(changes, FrameChanges::default());
    }

    #[test]
    fn test_idle_frame_reports_no_changes() {
        let dispatcher = FrameDispatcher::default();
        let mut scene = test_scene();
        let eye = scene.camera_manager.camera.eye;
        let view = scene.camera_manager.camera.view_matrix();

        let changes = dispatcher.dispatch(
            &mut scene,
            ManipMode::Camera,
            None,
            &InputSnapshot::default(),
            0.016,
        );

        assert_eq!(changes, FrameChanges::default());
        assert_eq!(scene.camera_manager.camera.eye, eye);
        assert_eq!(scene.camera_manager.camera.view_matrix(), view);
    }
}
