//! Hardware gamepads through `gilrs`.
//!
//! # Channel conventions
//! Buttons are exposed in the standard-mapping order below, so `gp-b0` is the bottom
//! face button on every supported controller:
//!
//! | idx | button        | idx | button         |
//! |-----|---------------|-----|----------------|
//! | 0   | South (A)     | 9   | Start          |
//! | 1   | East (B)      | 10  | Left thumb     |
//! | 2   | West (X)      | 11  | Right thumb    |
//! | 3   | North (Y)     | 12  | D-pad up       |
//! | 4   | Left bumper   | 13  | D-pad down     |
//! | 5   | Right bumper  | 14  | D-pad left     |
//! | 6   | Left trigger  | 15  | D-pad right    |
//! | 7   | Right trigger | 16  | Mode / guide   |
//! | 8   | Select        |     |                |
//!
//! Stick Y axes are inverted relative to gilrs so that down is positive.
//!
//! gilrs only refreshes gamepad state while its event queue is drained, which happens in
//! [`GamepadSource::drain_connections`] at the start of every update.

use crate::device::{GamepadConnection, GamepadSource};
use crate::snapshot::GamepadSnapshot;
use gilrs::{Axis, Button, EventType, Gilrs};

const BUTTONS: [Button; 17] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
    Button::Mode,
];

pub struct GilrsSource {
    gilrs: Gilrs,
    pending: Vec<GamepadConnection>,
}

impl GilrsSource {
    /// Start gilrs. Gamepads already attached are reported as connected on the first
    /// update.
    pub fn new() -> Result<Self, gilrs::Error> {
        let gilrs = Gilrs::new()?;
        let pending = gilrs
            .gamepads()
            .map(|(id, _)| GamepadConnection::Connected(usize::from(id)))
            .collect();
        Ok(Self { gilrs, pending })
    }

    fn pump(&mut self) {
        while let Some(event) = self.gilrs.next_event() {
            let index = usize::from(event.id);
            match event.event {
                EventType::Connected => self.pending.push(GamepadConnection::Connected(index)),
                EventType::Disconnected => {
                    self.pending.push(GamepadConnection::Disconnected(index))
                }
                _ => {}
            }
        }
    }
}

impl GamepadSource for GilrsSource {
    fn read(&mut self, index: usize) -> Option<GamepadSnapshot> {
        let (_, pad) = self
            .gilrs
            .gamepads()
            .find(|(id, _)| usize::from(*id) == index)?;
        Some(GamepadSnapshot {
            index,
            buttons: BUTTONS.iter().map(|b| pad.is_pressed(*b)).collect(),
            left: (pad.value(Axis::LeftStickX), -pad.value(Axis::LeftStickY)),
            right: (pad.value(Axis::RightStickX), -pad.value(Axis::RightStickY)),
        })
    }

    fn drain_connections(&mut self) -> Vec<GamepadConnection> {
        self.pump();
        std::mem::take(&mut self.pending)
    }
}
