use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::{config::ViewerConfig, error::Result, viewer::SceneViewer};

/// Slider units moved per key press for zoom and light (0.5 world units).
const SLIDER_STEP: i32 = 5;
/// Degrees of pitch per key press.
const PITCH_STEP: i32 = 5;

/// What a key press asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    RotateLeft,
    RotateRight,
    Tilt(i32),
    Zoom(i32),
    MoveLight { axis: Axis, delta: i32 },
    ReloadScene,
    ReloadShaders,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Maps a physical key to a viewer action.
pub fn key_action(key: KeyCode) -> Option<HostAction> {
    let action = match key {
        KeyCode::ArrowLeft => HostAction::RotateLeft,
        KeyCode::ArrowRight => HostAction::RotateRight,
        KeyCode::ArrowUp => HostAction::Tilt(-PITCH_STEP),
        KeyCode::ArrowDown => HostAction::Tilt(PITCH_STEP),
        KeyCode::Equal | KeyCode::NumpadAdd => HostAction::Zoom(-SLIDER_STEP),
        KeyCode::Minus | KeyCode::NumpadSubtract => HostAction::Zoom(SLIDER_STEP),
        KeyCode::KeyA => HostAction::MoveLight { axis: Axis::X, delta: -SLIDER_STEP },
        KeyCode::KeyD => HostAction::MoveLight { axis: Axis::X, delta: SLIDER_STEP },
        KeyCode::KeyQ => HostAction::MoveLight { axis: Axis::Y, delta: -SLIDER_STEP },
        KeyCode::KeyE => HostAction::MoveLight { axis: Axis::Y, delta: SLIDER_STEP },
        KeyCode::KeyW => HostAction::MoveLight { axis: Axis::Z, delta: -SLIDER_STEP },
        KeyCode::KeyS => HostAction::MoveLight { axis: Axis::Z, delta: SLIDER_STEP },
        KeyCode::KeyL => HostAction::ReloadScene,
        KeyCode::KeyR => HostAction::ReloadShaders,
        KeyCode::Escape => HostAction::Quit,
        _ => return None,
    };
    Some(action)
}

fn to_slider(value: f32) -> i32 {
    (value * 10.0).round() as i32
}

/// Applies `action` to the viewer. Returns whether a redraw is needed.
pub fn apply_action(viewer: &mut SceneViewer, action: HostAction) -> bool {
    let state = *viewer.state();
    match action {
        HostAction::RotateLeft => viewer.rotate_camera_left(),
        HostAction::RotateRight => viewer.rotate_camera_right(),
        HostAction::Tilt(delta) => viewer.rotate_camera_x(state.camera.pitch.round() as i32 + delta),
        HostAction::Zoom(delta) => viewer.zoom_camera(to_slider(state.camera.zoom) + delta),
        HostAction::MoveLight { axis, delta } => {
            let light = state.light.position;
            match axis {
                Axis::X => viewer.light_x(to_slider(light.x) + delta),
                Axis::Y => viewer.light_y(to_slider(light.y) + delta),
                Axis::Z => viewer.light_z(to_slider(light.z) + delta),
            }
        }
        HostAction::ReloadScene => {
            let path = viewer.config().scene_path.clone();
            match viewer.load_new_scene(&path) {
                Ok(changed) => changed,
                Err(err) => {
                    log::error!("Scene reload failed, keeping current scene: {err}");
                    false
                }
            }
        }
        HostAction::ReloadShaders => match viewer.reload_shaders() {
            Ok(changed) => changed,
            Err(err) => {
                log::error!("{err}");
                false
            }
        },
        HostAction::Quit => false,
    }
}

pub struct ViewerApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    viewer: SceneViewer,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;

        Ok(Self {
            event_loop,
            app_state: AppState {
                window: None,
                viewer: SceneViewer::new(config),
            },
        })
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(self) -> Result<()> {
        let ViewerApp {
            event_loop,
            mut app_state,
        } = self;
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut app_state)?;
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let config = self.viewer.config();
        let (width, height) = config.window_size;
        let attributes = WindowAttributes::default()
            .with_title(config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();
        if let Err(err) = self.viewer.initialize(window.clone(), width, height) {
            log::error!("Viewer initialization failed: {err}");
        }
        window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match key_action(key_code) {
                Some(HostAction::Quit) => event_loop.exit(),
                Some(action) => {
                    if apply_action(&mut self.viewer, action) {
                        window.request_redraw();
                    }
                }
                None => (),
            },
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if self.viewer.resize(width, height) {
                    window.request_redraw();
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.viewer.paint() {
                    log::error!("Frame failed: {err}");
                }
            }
            _ => (),
        }
    }
}
