use crate::axis::Stick;
use crate::device::{GamepadConnection, GamepadSource};
use crate::snapshot::GamepadSnapshot;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Default)]
struct VirtualState {
    pads: BTreeMap<usize, GamepadSnapshot>,
    pending: Vec<GamepadConnection>,
}

/// In-memory gamepads driven by the host.
///
/// Clones share state: keep one handle to feed input while the manager polls another.
#[derive(Clone, Default)]
pub struct VirtualGamepads {
    inner: Rc<RefCell<VirtualState>>,
}

impl VirtualGamepads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a gamepad at `index` with every button released and both sticks centered.
    pub fn plug(&self, index: usize) {
        let mut state = self.inner.borrow_mut();
        state.pads.insert(index, GamepadSnapshot::new(index));
        state.pending.push(GamepadConnection::Connected(index));
    }

    pub fn unplug(&self, index: usize) {
        let mut state = self.inner.borrow_mut();
        if state.pads.remove(&index).is_some() {
            state.pending.push(GamepadConnection::Disconnected(index));
        }
    }

    /// Set a button. Ignored if `index` is not plugged in.
    pub fn set_button(&self, index: usize, button: usize, pressed: bool) {
        if let Some(pad) = self.inner.borrow_mut().pads.get_mut(&index) {
            if pad.buttons.len() <= button {
                pad.buttons.resize(button + 1, false);
            }
            pad.buttons[button] = pressed;
        }
    }

    /// Set a stick pair. Ignored if `index` is not plugged in.
    pub fn set_stick(&self, index: usize, stick: Stick, value: (f32, f32)) {
        if let Some(pad) = self.inner.borrow_mut().pads.get_mut(&index) {
            match stick {
                Stick::Left => pad.left = value,
                Stick::Right => pad.right = value,
            }
        }
    }
}

impl GamepadSource for VirtualGamepads {
    fn read(&mut self, index: usize) -> Option<GamepadSnapshot> {
        self.inner.borrow().pads.get(&index).cloned()
    }

    fn drain_connections(&mut self) -> Vec<GamepadConnection> {
        std::mem::take(&mut self.inner.borrow_mut().pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let host = VirtualGamepads::new();
        let mut polled = host.clone();
        host.plug(3);
        host.set_button(3, 2, true);
        host.set_stick(3, Stick::Right, (0.5, -0.5));

        assert_eq!(
            polled.drain_connections(),
            vec![GamepadConnection::Connected(3)]
        );
        assert!(polled.drain_connections().is_empty());

        let pad = polled.read(3).unwrap();
        assert_eq!(pad.buttons, vec![false, false, true]);
        assert_eq!(pad.right, (0.5, -0.5));
    }

    #[test]
    fn unplug_reports_once() {
        let host = VirtualGamepads::new();
        let mut polled = host.clone();
        host.plug(0);
        host.unplug(0);
        host.unplug(0);
        assert_eq!(
            polled.drain_connections(),
            vec![
                GamepadConnection::Connected(0),
                GamepadConnection::Disconnected(0)
            ]
        );
        assert!(polled.read(0).is_none());
    }

    #[test]
    fn writes_to_missing_pad_are_ignored() {
        let mut host = VirtualGamepads::new();
        host.set_button(1, 0, true);
        assert!(host.read(1).is_none());
    }
}
