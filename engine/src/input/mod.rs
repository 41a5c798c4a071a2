//! Input Module
//!
//! Per-tick input snapshot handed to the sandbox by the host.
//! Decoupled from any windowing system: the host translates its own events
//! into an [`InputSnapshot`] once per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Generic key codes, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    E,
    R,
    Q,
    Tab,
    Escape,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
}

/// Everything the sandbox reads from input during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Pointer position in pixels, origin bottom-left
    pub pointer: Vec2,
    /// Primary action (left click / tap) went down this tick
    pub primary_action: bool,
    /// Keys that went down this tick
    pub keys_pressed: Vec<KeyCode>,
}

impl InputSnapshot {
    /// Snapshot with the pointer at `pointer` and nothing pressed.
    pub fn at(pointer: Vec2) -> Self {
        Self {
            pointer,
            ..Default::default()
        }
    }

    /// Mark the primary action as triggered and return self for chaining.
    pub fn with_click(mut self) -> Self {
        self.primary_action = true;
        self
    }

    /// Add a key press and return self for chaining.
    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.keys_pressed.push(key);
        self
    }

    /// Check if `key` went down this tick.
    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_default() {
        let input = InputSnapshot::default();
        assert_eq!(input.pointer, Vec2::ZERO);
        assert!(!input.primary_action);
        assert!(!input.was_pressed(KeyCode::E));
    }

    #[test]
    fn test_snapshot_builders() {
        let input = InputSnapshot::at(Vec2::new(10.0, 20.0))
            .with_click()
            .with_key(KeyCode::R);
        assert_eq!(input.pointer, Vec2::new(10.0, 20.0));
        assert!(input.primary_action);
        assert!(input.was_pressed(KeyCode::R));
        assert!(!input.was_pressed(KeyCode::E));
    }
}
