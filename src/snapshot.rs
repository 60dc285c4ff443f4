//! Per-poll gamepad snapshot.
//!
//! [`GamepadSnapshot`] is an **owned**, read-only view of one gamepad at the moment it
//! was polled. Sources produce one per connected index each frame; the manager diffs it
//! against what it saw last frame and hands a reference to every callback the poll
//! triggers.
//!
//! # Semantics
//! - `buttons[i]` is the pressed state of button `i` (identifier `gp-b{i}`).
//! - `left` / `right` are `(x, y)` stick pairs, clamped to `[-1.0, 1.0]`.
//! - Buttons beyond the end of `buttons` read as released.

use crate::axis::Stick;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GamepadSnapshot {
    /// Host-assigned gamepad index.
    pub index: usize,
    pub buttons: Vec<bool>,
    /// Primary stick.
    pub left: (f32, f32),
    /// Secondary stick.
    pub right: (f32, f32),
}

impl GamepadSnapshot {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Pressed state of button `idx` (`false` if out of range).
    #[inline]
    pub fn button(&self, idx: usize) -> bool {
        self.buttons.get(idx).copied().unwrap_or(false)
    }

    /// Current pair of the given stick.
    #[inline]
    pub fn stick(&self, stick: Stick) -> (f32, f32) {
        match stick {
            Stick::Left => self.left,
            Stick::Right => self.right,
        }
    }

    /// Copy with every stick component clamped into `[-1.0, 1.0]`.
    pub fn clamped(mut self) -> Self {
        let clamp = |(x, y): (f32, f32)| (x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
        self.left = clamp(self.left);
        self.right = clamp(self.right);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_button_is_released() {
        let mut pad = GamepadSnapshot::new(0);
        pad.buttons = vec![true];
        assert!(pad.button(0));
        assert!(!pad.button(7));
    }

    #[test]
    fn clamp_sticks() {
        let mut pad = GamepadSnapshot::new(1);
        pad.left = (1.5, -2.0);
        pad.right = (0.25, 0.5);
        let pad = pad.clamped();
        assert_eq!(pad.stick(Stick::Left), (1.0, -1.0));
        assert_eq!(pad.stick(Stick::Right), (0.25, 0.5));
    }
}
