//! Viewer context: camera, input table and fly settings in one value.
//!
//! The host loop hands every input event to [`Viewer::handle_event`] as it
//! arrives and calls [`Viewer::update`] once per frame before rendering. All
//! of it runs on the event-loop thread.

use glam::Mat4;

use crate::camera::{CameraSettings, CameraState};
use crate::core::{InputEvent, InputState, Key, KeyAction};

/// What the host loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerControl {
    Continue,
    Exit,
}

#[derive(Debug, Clone)]
pub struct Viewer {
    camera: CameraState,
    input: InputState,
    settings: CameraSettings,
}

impl Viewer {
    pub fn new(camera: CameraState, settings: CameraSettings) -> Self {
        Self {
            camera,
            input: InputState::new(),
            settings,
        }
    }

    /// Apply one input event. Mouse motion rotates the camera immediately;
    /// key events only update the held table.
    pub fn handle_event(&mut self, event: InputEvent) -> ViewerControl {
        match event {
            InputEvent::Key(key_event) => {
                self.input.apply_key(key_event);
                if key_event.key == Key::Quit && key_event.action == KeyAction::Press {
                    return ViewerControl::Exit;
                }
            }
            InputEvent::MouseMove(motion) => {
                if let Some((dx, dy)) = self.input.cursor_offset(motion) {
                    let sensitivity = self.settings.sensitivity;
                    self.camera.rotate(dx * sensitivity, dy * sensitivity);
                }
            }
        }
        ViewerControl::Continue
    }

    /// Run the movement integrator for a frame that lasted `delta` seconds
    pub fn update(&mut self, delta: f32) {
        self.camera.advance(&self.input, self.settings.speed, delta);
    }

    /// Drop held keys, e.g. when the window loses focus
    pub fn release_keys(&mut self) {
        self.input.release_all();
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(CameraState::default(), CameraSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Controller;
    use glam::Vec3;

    #[test]
    fn escape_press_requests_exit() {
        let mut viewer = Viewer::default();
        assert_eq!(viewer.handle_event(InputEvent::press(Key::Quit)), ViewerControl::Exit);
        assert_eq!(
            viewer.handle_event(InputEvent::release(Key::Quit)),
            ViewerControl::Continue
        );
    }

    #[test]
    fn movement_keys_continue() {
        let mut viewer = Viewer::default();
        assert_eq!(
            viewer.handle_event(InputEvent::press(Key::Forward)),
            ViewerControl::Continue
        );
        assert!(viewer.input().is_down(Key::Forward));
    }

    #[test]
    fn mouse_motion_scales_by_sensitivity() {
        let mut viewer = Viewer::default();
        viewer.handle_event(InputEvent::mouse_move(320.0, 320.0));
        viewer.handle_event(InputEvent::mouse_move(340.0, 300.0));

        // 20px right, 20px up at 0.05 deg/px
        assert!((viewer.camera().yaw() - (-90.0 + 1.0)).abs() < 1e-5);
        assert!((viewer.camera().pitch() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn update_without_keys_keeps_position() {
        let mut viewer = Viewer::default();
        let start = viewer.camera().position;
        for _ in 0..10 {
            viewer.update(0.016);
        }
        assert_eq!(viewer.camera().position, start);
    }

    #[test]
    fn release_keys_stops_motion() {
        let mut viewer = Viewer::default();
        viewer.handle_event(InputEvent::press(Key::Forward));
        viewer.release_keys();
        viewer.update(1.0);
        assert_eq!(viewer.camera().position, Vec3::new(0.0, 3.0, 3.0));
    }
}
