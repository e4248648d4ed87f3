use std::collections::HashSet;

/// Game actions a key can be bound to. Several physical keys may map to one role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    RotateLeft,
    RotateRight,
    Thrust,
    Reverse,
    Fire,
    Quit,
}

/// Keyboard state for one tick: what is held, and what went down this tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub held: HashSet<Key>,
    pub pressed: HashSet<Key>,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as held and freshly pressed.
    pub fn press(mut self, key: Key) -> Self {
        self.held.insert(key);
        self.pressed.insert(key);
        self
    }

    /// Marks `key` as held without a new press edge.
    pub fn hold(mut self, key: Key) -> Self {
        self.held.insert(key);
        self
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}
