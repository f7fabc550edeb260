//! Application shell and event loop
//!
//! Owns the winit event loop and everything per-window: render engine, UI,
//! scene, and interaction state. The frame loop is snapshot-driven: raw
//! events accumulate in [`InputState`], each redraw drains one snapshot,
//! dispatches it to exactly one controller, and uploads only what the
//! resulting dirty flags name.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::error::ViewerError;
use crate::gfx::{
    camera::{ArcballCamera, CameraController, CameraManager},
    rendering::RenderEngine,
    scene::Scene,
};
use crate::input::InputState;
use crate::interaction::FrameDispatcher;
use crate::ui::{viewer_panel, UiManager, ViewerState};

/// Longest frame delta fed to the controllers; caps the jump after a stall.
const MAX_FRAME_DT: f32 = 0.1;

pub struct ViewerApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    viewer_state: ViewerState,
    input: InputState,
    dispatcher: FrameDispatcher,
    last_frame: Instant,
}

impl ViewerApp {
    pub fn new() -> anyhow::Result<Self> {
        let event_loop = EventLoop::new()?;

        let camera = ArcballCamera::with_defaults(1.0);
        let camera_manager = CameraManager::new(camera, CameraController::default());
        let scene = Scene::new(camera_manager);

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                viewer_state: ViewerState::default(),
                input: InputState::new(),
                dispatcher: FrameDispatcher::default(),
                last_frame: Instant::now(),
            },
        })
    }

    /// Loads an OBJ file into the scene. May be called before `run`; GPU
    /// buffers are created once the window exists.
    pub fn add_object(&mut self, object_path: &str) -> Result<usize, ViewerError> {
        self.app_state.scene.add_object(object_path)
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.app_state.scene
    }

    /// Runs the event loop until the window closes. Consumes self.
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .ok_or_else(|| anyhow::anyhow!("event loop already consumed"))?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

impl AppState {
    /// One frame: drain input, dispatch to a single controller, upload what
    /// the dirty flags name, then draw.
    fn redraw(&mut self) {
        let dt = self.last_frame.elapsed().as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame = Instant::now();

        let (Some(window), Some(render_engine), Some(ui_manager)) = (
            self.window.as_ref(),
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
        ) else {
            return;
        };

        let scene = &mut self.scene;
        let viewer_state = &mut self.viewer_state;

        let mut reset_camera = false;
        let ui_wants_input = ui_manager.update_logic(window, |ui| {
            reset_camera = viewer_panel(ui, scene, viewer_state);
        });

        let snapshot = if ui_wants_input {
            // The panel owns the pointer this frame; stale deltas must not
            // leak into the next interaction frame.
            self.input.clear_pending();
            Default::default()
        } else {
            self.input.take_snapshot()
        };

        let mut changes = self.dispatcher.dispatch(
            scene,
            viewer_state.mode,
            viewer_state.selected,
            &snapshot,
            dt,
        );

        if reset_camera {
            scene.camera_manager.camera.reset();
            changes.camera = true;
        }

        if changes.camera {
            render_engine.update(scene.camera_manager.camera.uniform, &scene.lights);
        }
        if let Some(index) = changes.node {
            scene.upload_node_transform(index, render_engine.queue());
        }

        render_engine.render_frame(
            scene,
            Some(&mut |device, queue, encoder, view| {
                ui_manager.render(device, queue, encoder, view);
            }),
        );
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            WindowAttributes::default()
                .with_title("mirador")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();
        let render_engine =
            match pollster::block_on(RenderEngine::new(window.clone(), width, height)) {
                Ok(engine) => engine,
                Err(e) => {
                    log::error!("failed to initialize renderer: {}", e);
                    event_loop.exit();
                    return;
                }
            };

        self.scene.camera_manager.camera.resize_projection(width, height);
        self.scene.init_gpu_resources(
            render_engine.device(),
            render_engine.queue(),
            render_engine.transform_layout(),
            render_engine.material_bindings(),
        );

        let mut ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
        );
        ui_manager.update_display_size(width, height);

        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(render_engine);

        // First frame needs the camera uniform before any input arrives.
        if let Some(render_engine) = self.render_engine.as_mut() {
            render_engine.update(self.scene.camera_manager.camera.uniform, &self.scene.lights);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(window, &ui_event) {
                self.input.clear_pending();
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::MouseInput { button, state, .. } => {
                self.input.handle_mouse_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.input.accumulate_scroll(&delta);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.input.handle_modifiers(modifiers.state());
            }
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        ..
                    },
                ..
            } => {
                if matches!(key_code, winit::keyboard::KeyCode::Escape) {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                    render_engine
                        .update(self.scene.camera_manager.camera.uniform, &self.scene.lights);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            let ui_has_mouse = self
                .ui_manager
                .as_ref()
                .is_some_and(|ui| ui.context.io().want_capture_mouse);
            if !ui_has_mouse {
                self.input.accumulate_motion(delta);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
