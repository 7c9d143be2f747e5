use super::controller::{Controller, Key, KeyAction};

/// Key transition as an explicit value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
}

/// Absolute cursor position in window-local pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Everything the viewer reacts to, consumed in arrival order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(KeyEvent),
    MouseMove(MouseMoveEvent),
}

impl InputEvent {
    pub fn press(key: Key) -> Self {
        InputEvent::Key(KeyEvent {
            key,
            action: KeyAction::Press,
        })
    }

    pub fn release(key: Key) -> Self {
        InputEvent::Key(KeyEvent {
            key,
            action: KeyAction::Release,
        })
    }

    pub fn mouse_move(x: f32, y: f32) -> Self {
        InputEvent::MouseMove(MouseMoveEvent { x, y })
    }
}

/// Held-key table plus the cursor baseline used for mouse-look deltas
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; Key::COUNT],
    /// `None` until the first cursor sample arrives
    last_cursor: Option<(f32, f32)>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror a key transition. Repeated presses are harmless.
    pub fn apply_key(&mut self, event: KeyEvent) {
        self.held[event.key.index()] = matches!(event.action, KeyAction::Press);
    }

    /// Record a cursor sample and return the look offset `(dx, dy)` relative
    /// to the previous sample. `dy` grows upward. The first sample only sets
    /// the baseline and yields `None`.
    pub fn cursor_offset(&mut self, event: MouseMoveEvent) -> Option<(f32, f32)> {
        let previous = self.last_cursor.replace((event.x, event.y));
        previous.map(|(last_x, last_y)| (event.x - last_x, last_y - event.y))
    }

    pub fn last_cursor(&self) -> Option<(f32, f32)> {
        self.last_cursor
    }

    /// Release every key; the cursor baseline is kept
    pub fn release_all(&mut self) {
        self.held = [false; Key::COUNT];
    }
}

impl Controller for InputState {
    fn is_down(&self, key: Key) -> bool {
        self.held[key.index()]
    }
}
