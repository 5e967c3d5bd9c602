//! Keyboard state table
//!
//! A fixed-size array of key flags, written by platform key events and
//! polled once per frame. Launch is edge-triggered: a held key fires once
//! until it is released.

use crate::consts::KEY_COUNT;
use crate::sim::TickInput;

/// Key codes (DOM `keyCode` values)
pub mod keys {
    pub const SPACE: u32 = 32;
    pub const LEFT: u32 = 37;
    pub const RIGHT: u32 = 39;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
}

#[derive(Debug, Clone)]
pub struct KeyState {
    down: [bool; KEY_COUNT],
    /// Keys whose press has already been consumed by an edge-triggered action
    processed: [bool; KEY_COUNT],
}

impl Default for KeyState {
    fn default() -> Self {
        Self {
            down: [false; KEY_COUNT],
            processed: [false; KEY_COUNT],
        }
    }
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Codes outside the table are ignored.
    pub fn press(&mut self, code: u32) {
        if let Some(slot) = self.down.get_mut(code as usize) {
            *slot = true;
        }
    }

    /// Record a key release
    pub fn release(&mut self, code: u32) {
        let idx = code as usize;
        if idx < KEY_COUNT {
            self.down[idx] = false;
            self.processed[idx] = false;
        }
    }

    pub fn is_down(&self, code: u32) -> bool {
        self.down.get(code as usize).copied().unwrap_or(false)
    }

    /// True once per press of `code`
    pub fn take_press(&mut self, code: u32) -> bool {
        let idx = code as usize;
        if idx < KEY_COUNT && self.down[idx] && !self.processed[idx] {
            self.processed[idx] = true;
            return true;
        }
        false
    }

    /// Release everything (window lost focus)
    pub fn clear(&mut self) {
        self.down = [false; KEY_COUNT];
        self.processed = [false; KEY_COUNT];
    }

    /// Poll the table into a tick input, consuming the launch edge
    pub fn poll(&mut self) -> TickInput {
        TickInput {
            move_left: self.is_down(keys::LEFT) || self.is_down(keys::A),
            move_right: self.is_down(keys::RIGHT) || self.is_down(keys::D),
            launch: self.take_press(keys::SPACE),
            idle_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut state = KeyState::new();
        state.press(keys::A);
        assert!(state.is_down(keys::A));
        state.release(keys::A);
        assert!(!state.is_down(keys::A));
    }

    #[test]
    fn test_out_of_range_codes_ignored() {
        let mut state = KeyState::new();
        state.press(5000);
        assert!(!state.is_down(5000));
        state.release(5000);
        assert!(!state.take_press(5000));
    }

    #[test]
    fn test_launch_is_edge_triggered() {
        let mut state = KeyState::new();
        state.press(keys::SPACE);
        assert!(state.poll().launch);
        // Still held: no second launch
        assert!(!state.poll().launch);

        state.release(keys::SPACE);
        state.press(keys::SPACE);
        assert!(state.poll().launch);
    }

    #[test]
    fn test_poll_movement() {
        let mut state = KeyState::new();
        state.press(keys::LEFT);
        let input = state.poll();
        assert!(input.move_left);
        assert!(!input.move_right);

        state.clear();
        state.press(keys::D);
        let input = state.poll();
        assert!(!input.move_left);
        assert!(input.move_right);
    }
}
