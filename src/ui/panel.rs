//! Viewer control panel
//!
//! The panel drives the [`ViewerState`]: which manipulation mode is active
//! and which node is selected. Transform edits themselves happen through
//! mouse interaction, not through the panel.

use crate::gfx::scene::Scene;
use crate::interaction::ManipMode;

/// UI-owned interaction state, read by the frame dispatcher.
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewerState {
    pub mode: ManipMode,
    pub selected: Option<usize>,
}

/// Builds the viewer panel. Returns true when the camera reset button was
/// clicked this frame.
pub fn viewer_panel(ui: &imgui::Ui, scene: &mut Scene, state: &mut ViewerState) -> bool {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return false;
    }

    let mut reset_camera = false;

    ui.window("Viewer")
        .size([300.0, 400.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            ui.text("Manipulation Mode");
            ui.separator();
            if ui.radio_button_bool("Camera", state.mode == ManipMode::Camera) {
                state.mode = ManipMode::Camera;
            }
            if ui.radio_button_bool("Selected Node", state.mode == ManipMode::SceneNode) {
                state.mode = ManipMode::SceneNode;
            }

            ui.spacing();
            ui.text("Scene Nodes");
            ui.separator();

            let node_names = scene.node_names();
            if node_names.is_empty() {
                ui.text_disabled("No nodes loaded");
            } else {
                ui.child_window("node_list")
                    .size([0.0, 150.0])
                    .border(true)
                    .build(|| {
                        for (i, name) in node_names.iter().enumerate() {
                            let is_selected = state.selected == Some(i);
                            if ui.selectable_config(name).selected(is_selected).build() {
                                state.selected = Some(i);
                            }
                        }
                    });
            }

            if let Some(index) = state.selected {
                if let Some(node) = scene.get_node_mut(index) {
                    ui.spacing();
                    ui.text(format!("Selected: {}", node.name));
                    ui.checkbox("Visible", &mut node.visible);
                } else {
                    // Stale selection, e.g. after external scene edits.
                    state.selected = None;
                }
            }

            ui.spacing();
            ui.separator();
            if ui.button("Reset Camera") {
                reset_camera = true;
            }
        });

    reset_camera
}
