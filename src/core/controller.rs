/// Keys the viewer consults. Anything else the platform reports is dropped
/// before it reaches the input state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    Quit,
}

impl Key {
    pub const COUNT: usize = 5;

    pub const ALL: [Key; Key::COUNT] = [
        Key::Forward,
        Key::Backward,
        Key::StrafeLeft,
        Key::StrafeRight,
        Key::Quit,
    ];

    /// Slot of this key in a held-flag table
    pub const fn index(self) -> usize {
        match self {
            Key::Forward => 0,
            Key::Backward => 1,
            Key::StrafeLeft => 2,
            Key::StrafeRight => 3,
            Key::Quit => 4,
        }
    }
}

/// Key transition reported by the windowing system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
}

/// Controller - answers "is this key currently held"
pub trait Controller {
    /// Check if key is currently down
    fn is_down(&self, key: Key) -> bool;

    /// Collect all currently held keys, in table order
    fn down_keys(&self) -> Vec<Key> {
        Key::ALL.into_iter().filter(|&k| self.is_down(k)).collect()
    }
}
