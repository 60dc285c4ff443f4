//! Last-observed input state, used to detect edges between events and polls.
//!
//! Keys are tracked from keyboard events; buttons and sticks are tracked per gamepad
//! index from polls. The tracker only records and compares; it never dispatches.

use crate::axis::{is_centered, Stick};
use crate::event::{KeyAction, KeyEvent};
use std::collections::HashMap;

/// Stored state of one input. `None` means never seen.
pub type InputState = Option<KeyAction>;

/// Result of feeding a stick reading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StickUpdate {
    /// Either component differs from the previous poll.
    pub changed: bool,
    /// Stick came back inside the rest zone after being outside it.
    pub returned_to_rest: bool,
}

#[derive(Clone, Copy, Debug)]
struct StickRecord {
    state: KeyAction,
    value: (f32, f32),
}

#[derive(Debug, Default)]
pub struct InputStateTracker {
    keys: HashMap<String, (KeyAction, KeyEvent)>,
    buttons: HashMap<(usize, usize), KeyAction>,
    sticks: HashMap<(usize, Stick), StickRecord>,
}

impl InputStateTracker {
    pub fn key_state(&self, key: &str) -> InputState {
        self.keys.get(key).map(|(state, _)| *state)
    }

    /// Store a keyboard event. Returns `true` when it is an edge.
    ///
    /// The stored state is overwritten regardless, so auto-repeat events are not edges.
    pub fn record_key(&mut self, event: &KeyEvent) -> bool {
        let next = event.key_action();
        let edge = self.key_state(&event.key) != Some(next);
        self.keys.insert(event.key.clone(), (next, event.clone()));
        edge
    }

    /// Last event of every key currently held down, sorted by key name.
    pub fn held_keys(&self) -> Vec<KeyEvent> {
        let mut held: Vec<KeyEvent> = self
            .keys
            .values()
            .filter(|(state, _)| *state == KeyAction::Pressed)
            .map(|(_, event)| event.clone())
            .collect();
        held.sort_by(|a, b| a.key.cmp(&b.key));
        held
    }

    /// Store a button reading. Returns `true` when it differs from the previous poll;
    /// an unseen button counts as released.
    pub fn record_button(&mut self, gamepad: usize, button: usize, pressed: bool) -> bool {
        let next = if pressed {
            KeyAction::Pressed
        } else {
            KeyAction::Released
        };
        let prev = self
            .buttons
            .insert((gamepad, button), next)
            .unwrap_or(KeyAction::Released);
        prev != next
    }

    /// Store a stick reading. An unseen stick counts as resting at `(0, 0)`.
    pub fn record_stick(&mut self, gamepad: usize, stick: Stick, value: (f32, f32)) -> StickUpdate {
        let prev = self
            .sticks
            .get(&(gamepad, stick))
            .copied()
            .unwrap_or(StickRecord {
                state: KeyAction::Released,
                value: (0.0, 0.0),
            });
        let state = if is_centered(value.0, value.1) {
            KeyAction::Released
        } else {
            KeyAction::Pressed
        };
        self.sticks.insert((gamepad, stick), StickRecord { state, value });
        StickUpdate {
            changed: prev.value != value,
            returned_to_rest: prev.state == KeyAction::Pressed && state == KeyAction::Released,
        }
    }

    /// Drop every record belonging to `gamepad`.
    pub fn forget_gamepad(&mut self, gamepad: usize) {
        self.buttons.retain(|(pad, _), _| *pad != gamepad);
        self.sticks.retain(|(pad, _), _| *pad != gamepad);
    }
}
