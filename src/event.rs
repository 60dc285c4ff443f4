//! Events and delivery descriptions.
//!
//! Bindery separates *what happened* (a [`KeyEvent`], a gamepad poll) from *what it
//! means* (a named action). Raw occurrences are classified by [`InputKind`] and
//! [`DeliveryContext`], and every callback invocation receives an [`ActionEvent`].
//!
//! ## Value conventions
//! - **Stick axes:** normalized to `[-1.0, 1.0]`, reported as `(x, y)` pairs.
//! - **Buttons and keys:** boolean state expressed as [`KeyAction::Pressed`] /
//!   [`KeyAction::Released`].
//!
//! ## Delivery cadence
//! - [`DeliveryContext::Change`]: once per edge (pressed <-> released).
//! - [`DeliveryContext::Continuous`]: every poll while held, plus one release.
//! - [`DeliveryContext::Repeat`]: once per raw keyboard event, auto-repeat included.

use crate::errors::ParseError;
use crate::snapshot::GamepadSnapshot;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Modifier keys held while a keyboard event was produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
        alt: false,
    };

    pub const ALT: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: true,
    };

    /// `true` when any modifier is held.
    #[inline]
    pub fn any(&self) -> bool {
        self.ctrl || self.shift || self.alt
    }
}

/// Raw keyboard notification forwarded by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyEvent {
    /// Host key name (e.g. `"space"`, `"KeyW"`). Used verbatim as the input identifier.
    pub key: String,
    /// `true` for key-down (including auto-repeat), `false` for key-up.
    pub pressed: bool,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn down(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            pressed: true,
            modifiers,
        }
    }

    pub fn up(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            pressed: false,
            modifiers,
        }
    }

    #[inline]
    pub fn key_action(&self) -> KeyAction {
        if self.pressed {
            KeyAction::Pressed
        } else {
            KeyAction::Released
        }
    }
}

/// Logical state of a tracked input, and the direction of an occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Pressed,
    Released,
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAction::Pressed => f.write_str("pressed"),
            KeyAction::Released => f.write_str("released"),
        }
    }
}

/// Category of physical input a binding listens to.
///
/// Assigned once when a binding is created and never re-derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKind {
    Key,
    GamepadButton,
    GamepadAxes,
    /// The `any` wildcard: matched by every key and gamepad button occurrence.
    Any,
}

impl InputKind {
    /// Kinds subject to modifier gating.
    #[inline]
    pub fn is_keyboard_like(self) -> bool {
        matches!(self, InputKind::Key | InputKind::Any)
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputKind::Key => "key",
            InputKind::GamepadButton => "gamepad_button",
            InputKind::GamepadAxes => "gamepad_axes",
            InputKind::Any => "any",
        };
        f.write_str(name)
    }
}

/// Cadence class of a single dispatch pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeliveryContext {
    Continuous,
    Change,
    Repeat,
}

/// Requested delivery frequency of a callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Continuous,
    Change,
    Repeat,
}

impl Frequency {
    /// Frequency used when a callback does not declare one.
    pub fn default_for(kind: InputKind) -> Frequency {
        match kind {
            InputKind::Key => Frequency::Repeat,
            InputKind::GamepadButton | InputKind::Any => Frequency::Change,
            InputKind::GamepadAxes => Frequency::Continuous,
        }
    }

    /// Whether a callback with this frequency is invoked for `(kind, context)`.
    ///
    /// `Repeat` maps onto the nearest native cadence of each kind: raw keyboard
    /// events for keys, edges for buttons and the wildcard, polls for sticks.
    pub fn fires_on(self, kind: InputKind, context: DeliveryContext) -> bool {
        match self {
            Frequency::Continuous => context == DeliveryContext::Continuous,
            Frequency::Change => context == DeliveryContext::Change,
            Frequency::Repeat => match kind {
                InputKind::Key => context == DeliveryContext::Repeat,
                InputKind::GamepadButton | InputKind::Any => context == DeliveryContext::Change,
                InputKind::GamepadAxes => context == DeliveryContext::Continuous,
            },
        }
    }
}

impl FromStr for Frequency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "continuous" => Ok(Frequency::Continuous),
            "change" => Ok(Frequency::Change),
            "repeat" => Ok(Frequency::Repeat),
            other => Err(ParseError::UnknownFrequency(other.to_string())),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Continuous => "continuous",
            Frequency::Change => "change",
            Frequency::Repeat => "repeat",
        };
        f.write_str(name)
    }
}

/// Payload handed to every callback invocation.
#[derive(Clone, Copy, Debug)]
pub struct ActionEvent<'a> {
    /// Action the callback was registered under.
    pub action: &'a str,
    /// Concrete input that produced the occurrence.
    pub input_name: &'a str,
    /// Kind of the matching binding; [`InputKind::Any`] for wildcard deliveries.
    pub input_type: InputKind,
    pub key_action: KeyAction,
    /// Causing keyboard event, if the occurrence came from the keyboard.
    pub event: Option<&'a KeyEvent>,
    /// Causing gamepad poll, if the occurrence came from a gamepad.
    pub gamepad: Option<&'a GamepadSnapshot>,
    /// Invocations left before this one is charged; `0` means unlimited.
    pub expiry: u32,
    /// Effective frequency of the callback.
    pub frequency: Frequency,
    pub context: DeliveryContext,
    /// Current stick pair, for [`InputKind::GamepadAxes`] bindings.
    pub axes: Option<(f32, f32)>,
}
