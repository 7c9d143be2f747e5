use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::CursorGrabMode;

use super::controller::{Key, KeyAction};
use super::input::InputEvent;

/// Where absolute cursor coordinates come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorSource {
    /// `CursorMoved` positions, used when the cursor is free or confined
    Window,
    /// Raw device motion summed into a virtual position, used when the cursor
    /// is locked and the window stops reporting positions
    Device,
}

impl CursorSource {
    /// Source to read once a grab has been attempted. Any grab (locked or
    /// confined) pins the OS cursor, so only raw device motion keeps turning
    /// unbounded; without a grab the window positions are all there is.
    pub fn for_grab(grab: Option<CursorGrabMode>) -> Self {
        match grab {
            Some(CursorGrabMode::Locked | CursorGrabMode::Confined) => CursorSource::Device,
            Some(CursorGrabMode::None) | None => CursorSource::Window,
        }
    }
}

/// Adapter that turns Winit events into viewer input events
#[derive(Debug, Clone)]
pub struct WinitInputAdapter {
    source: CursorSource,
    /// Virtual cursor for `CursorSource::Device`
    virtual_cursor: (f64, f64),
}

impl WinitInputAdapter {
    /// Create an adapter reading window cursor positions
    pub fn new() -> Self {
        Self {
            source: CursorSource::Window,
            virtual_cursor: (0.0, 0.0),
        }
    }

    pub fn source(&self) -> CursorSource {
        self.source
    }

    /// Switch the cursor source. The virtual cursor restarts at `origin`.
    pub fn set_source(&mut self, source: CursorSource, origin: (f64, f64)) {
        self.source = source;
        self.virtual_cursor = origin;
    }

    /// Translate a window event. Unmapped keys and unrelated events yield `None`.
    pub fn translate(&self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return None;
                };
                let key = Self::keycode_to_key(code)?;
                Some(match Self::state_to_action(event.state) {
                    KeyAction::Press => InputEvent::press(key),
                    KeyAction::Release => InputEvent::release(key),
                })
            }
            WindowEvent::CursorMoved { position, .. } if self.source == CursorSource::Window => {
                Some(InputEvent::mouse_move(position.x as f32, position.y as f32))
            }
            _ => None,
        }
    }

    /// Events the held-key table must see even when the overlay consumed them.
    /// A swallowed key release would leave the key held.
    pub fn is_input_critical(event: &WindowEvent) -> bool {
        matches!(
            event,
            WindowEvent::KeyboardInput { .. } | WindowEvent::Focused(_)
        )
    }

    /// Fold a raw device motion delta into the virtual cursor
    pub fn device_motion(&mut self, delta: (f64, f64)) -> Option<InputEvent> {
        if self.source != CursorSource::Device {
            return None;
        }
        self.virtual_cursor.0 += delta.0;
        self.virtual_cursor.1 += delta.1;
        Some(InputEvent::mouse_move(
            self.virtual_cursor.0 as f32,
            self.virtual_cursor.1 as f32,
        ))
    }

    /// Map Winit KeyCode to Key
    pub fn keycode_to_key(keycode: KeyCode) -> Option<Key> {
        match keycode {
            KeyCode::KeyW => Some(Key::Forward),
            KeyCode::KeyS => Some(Key::Backward),
            KeyCode::KeyA => Some(Key::StrafeLeft),
            KeyCode::KeyD => Some(Key::StrafeRight),
            KeyCode::Escape => Some(Key::Quit),
            _ => None,
        }
    }

    /// Key repeats arrive as `Pressed` and map to `Press`
    pub fn state_to_action(state: ElementState) -> KeyAction {
        match state {
            ElementState::Pressed => KeyAction::Press,
            ElementState::Released => KeyAction::Release,
        }
    }
}

impl Default for WinitInputAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::MouseMoveEvent;

    // Winit KeyEvent/DeviceId cannot be built outside winit, so these tests
    // cover the mapping helpers and the device-motion path.

    #[test]
    fn test_movement_keys_map() {
        assert_eq!(WinitInputAdapter::keycode_to_key(KeyCode::KeyW), Some(Key::Forward));
        assert_eq!(WinitInputAdapter::keycode_to_key(KeyCode::KeyS), Some(Key::Backward));
        assert_eq!(WinitInputAdapter::keycode_to_key(KeyCode::KeyA), Some(Key::StrafeLeft));
        assert_eq!(WinitInputAdapter::keycode_to_key(KeyCode::KeyD), Some(Key::StrafeRight));
        assert_eq!(WinitInputAdapter::keycode_to_key(KeyCode::Escape), Some(Key::Quit));
    }

    #[test]
    fn test_unmapped_keys_ignored() {
        for code in [KeyCode::KeyQ, KeyCode::Space, KeyCode::ShiftLeft, KeyCode::F12] {
            assert_eq!(WinitInputAdapter::keycode_to_key(code), None);
        }
    }

    #[test]
    fn test_state_to_action() {
        assert_eq!(
            WinitInputAdapter::state_to_action(ElementState::Pressed),
            KeyAction::Press
        );
        assert_eq!(
            WinitInputAdapter::state_to_action(ElementState::Released),
            KeyAction::Release
        );
    }

    #[test]
    fn test_device_motion_ignored_for_window_source() {
        let mut adapter = WinitInputAdapter::new();
        assert_eq!(adapter.source(), CursorSource::Window);
        assert_eq!(adapter.device_motion((5.0, 5.0)), None);
    }

    #[test]
    fn test_any_grab_reads_device_motion() {
        assert_eq!(
            CursorSource::for_grab(Some(CursorGrabMode::Locked)),
            CursorSource::Device
        );
        assert_eq!(
            CursorSource::for_grab(Some(CursorGrabMode::Confined)),
            CursorSource::Device
        );
        assert_eq!(CursorSource::for_grab(None), CursorSource::Window);
        assert_eq!(
            CursorSource::for_grab(Some(CursorGrabMode::None)),
            CursorSource::Window
        );
    }

    #[test]
    fn test_focus_changes_bypass_overlay() {
        assert!(WinitInputAdapter::is_input_critical(&WindowEvent::Focused(false)));
        assert!(WinitInputAdapter::is_input_critical(&WindowEvent::Focused(true)));
        assert!(!WinitInputAdapter::is_input_critical(&WindowEvent::CloseRequested));
        assert!(!WinitInputAdapter::is_input_critical(&WindowEvent::RedrawRequested));
    }

    #[test]
    fn test_device_motion_accumulates() {
        let mut adapter = WinitInputAdapter::new();
        adapter.set_source(CursorSource::Device, (320.0, 320.0));

        let first = adapter.device_motion((10.0, -4.0));
        assert_eq!(
            first,
            Some(InputEvent::MouseMove(MouseMoveEvent { x: 330.0, y: 316.0 }))
        );

        let second = adapter.device_motion((-2.5, 1.0));
        assert_eq!(
            second,
            Some(InputEvent::MouseMove(MouseMoveEvent { x: 327.5, y: 317.0 }))
        );
    }
}
