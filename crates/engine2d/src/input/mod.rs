//! Input polling
//!
//! The engine consumes two things from the platform each frame: discrete
//! quit signals (window close) and the instantaneous keyboard state. The
//! core itself reacts only to quit and the escape-to-quit binding;
//! applications read the rest through [`InputState`].

use std::collections::HashSet;

/// Key codes understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// S key
    S,
    /// W key
    W,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Snapshot of the input devices for the current frame
#[derive(Debug, Default)]
pub struct InputState {
    quit_requested: bool,
    pressed: HashSet<KeyCode>,
}

impl InputState {
    /// Create an empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the per-frame state before polling
    pub fn begin_frame(&mut self) {
        self.pressed.clear();
        self.quit_requested = false;
    }

    /// Record that the platform asked the process to quit
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Whether a quit signal arrived this frame
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Record the pressed/released state of a key
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.pressed.insert(key);
        } else {
            self.pressed.remove(&key);
        }
    }

    /// Instantaneous pressed state of a key
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }
}
