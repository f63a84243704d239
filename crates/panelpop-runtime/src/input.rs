//! Input state management

use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// Read-only keyboard queries.
///
/// Modes receive input through this trait only, so they can inspect the
/// results of the last poll but never poll themselves.
pub trait KeyInput {
    /// Is a key currently held down?
    fn is_key_down(&self, key: KeyCode) -> bool;

    /// Did the key go from released to pressed since the previous poll?
    fn is_key_just_pressed(&self, key: KeyCode) -> bool;

    /// Is either of the given keys held? Handy for left/right modifier pairs.
    fn is_any_down(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.is_key_down(*k))
    }

    /// Most recent key that went down since the previous poll
    fn last_just_pressed(&self) -> Option<KeyCode> {
        None
    }
}

/// Platform input source polled once per logic step
pub trait InputService: KeyInput {
    /// Drain pending platform events into the key state
    fn poll(&mut self);

    /// Has the platform asked the application to quit?
    fn quit_requested(&self) -> bool;
}

/// Tracks held and just-pressed keys between polls
#[derive(Debug, Default, Clone)]
pub struct KeyboardState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys pressed since the last `begin_poll`
    keys_just_pressed: HashSet<KeyCode>,
    /// Keys released since the last `begin_poll`
    keys_just_released: HashSet<KeyCode>,
    /// Latest edge since the last `begin_poll`
    last_pressed: Option<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a key press event. Auto-repeat presses of a held key are not edges.
    pub fn process_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_just_pressed.insert(key);
            self.last_pressed = Some(key);
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
        self.keys_just_released.insert(key);
    }

    /// Call at the start of each poll to clear per-step edges
    pub fn begin_poll(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
        self.last_pressed = None;
    }

    /// Forget everything, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.keys_just_released.extend(self.keys_down.drain());
        self.keys_just_pressed.clear();
        self.last_pressed = None;
    }

    pub fn is_key_just_released(&self, key: KeyCode) -> bool {
        self.keys_just_released.contains(&key)
    }
}

impl KeyInput for KeyboardState {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    fn last_just_pressed(&self) -> Option<KeyCode> {
        self.last_pressed
    }
}
