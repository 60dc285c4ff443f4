//! Input-to-action bindings.
//!
//! A [`Binding`] attaches one action name to one input identifier. The
//! [`BindingRegistry`] indexes them by input so dispatch is a single map lookup.
//!
//! # Identifier shapes
//! - `gp-b<N>`: gamepad button `N`
//! - `gp-a-left` / `gp-a-right`: primary / secondary stick
//! - `any`: wildcard matched by every key and gamepad button occurrence
//! - anything else: a keyboard key name
//!
//! # Invariants
//! At most one binding exists per `(input, action)` pair. Binding an existing pair again
//! leaves the original (and its settings) in place.

use crate::axis::{AxisCondition, AxisConditions, Stick, DEFAULT_DEADZONE};
use crate::event::{InputKind, Modifiers};
use serde::Deserialize;
use std::collections::HashMap;

/// Prefix of gamepad button identifiers.
pub const BUTTON_PREFIX: &str = "gp-b";
/// Prefix of gamepad stick identifiers.
pub const STICK_PREFIX: &str = "gp-a-";
pub const STICK_LEFT: &str = "gp-a-left";
pub const STICK_RIGHT: &str = "gp-a-right";
/// Wildcard identifier.
pub const ANY_INPUT: &str = "any";

/// Identifier of gamepad button `index`.
pub fn button_input(index: usize) -> String {
    format!("{BUTTON_PREFIX}{index}")
}

/// Classify an identifier. Unknown shapes are keys.
pub fn classify(input: &str) -> (InputKind, Stick) {
    if input == ANY_INPUT {
        (InputKind::Any, Stick::Left)
    } else if input == STICK_RIGHT {
        (InputKind::GamepadAxes, Stick::Right)
    } else if input.starts_with(STICK_PREFIX) {
        (InputKind::GamepadAxes, Stick::Left)
    } else if input.starts_with(BUTTON_PREFIX) {
        (InputKind::GamepadButton, Stick::Left)
    } else {
        (InputKind::Key, Stick::Left)
    }
}

/// Options accepted by `bind`. Every field has a default.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BindSettings {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Require that no modifier is held.
    pub none: bool,
    pub condition_x: AxisCondition,
    pub condition_y: AxisCondition,
    pub deadzone: f32,
}

impl Default for BindSettings {
    fn default() -> Self {
        Self {
            ctrl: false,
            shift: false,
            alt: false,
            none: false,
            condition_x: AxisCondition::Any,
            condition_y: AxisCondition::Any,
            deadzone: DEFAULT_DEADZONE,
        }
    }
}

impl BindSettings {
    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn no_modifiers(mut self) -> Self {
        self.none = true;
        self
    }

    pub fn conditions(mut self, x: AxisCondition, y: AxisCondition) -> Self {
        self.condition_x = x;
        self.condition_y = y;
        self
    }

    pub fn deadzone(mut self, deadzone: f32) -> Self {
        self.deadzone = deadzone;
        self
    }
}

/// Modifier requirements of a keyboard-like binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModifierGate {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub none: bool,
}

impl ModifierGate {
    /// Whether an occurrence carrying `held` modifiers gets through.
    pub fn admits(&self, held: Modifiers) -> bool {
        if self.ctrl && !held.ctrl {
            return false;
        }
        if self.shift && !held.shift {
            return false;
        }
        if self.alt && !held.alt {
            return false;
        }
        !(self.none && held.any())
    }
}

/// One input feeding one action.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub action: String,
    pub kind: InputKind,
    pub gate: ModifierGate,
    /// Stick pair read by [`InputKind::GamepadAxes`] bindings.
    pub stick: Stick,
    pub axis: AxisConditions,
}

impl Binding {
    pub fn new(input: &str, action: &str, settings: &BindSettings) -> Self {
        let (kind, stick) = classify(input);
        Self {
            action: action.to_string(),
            kind,
            gate: ModifierGate {
                ctrl: settings.ctrl,
                shift: settings.shift,
                alt: settings.alt,
                none: settings.none,
            },
            stick,
            axis: AxisConditions {
                x: settings.condition_x,
                y: settings.condition_y,
                deadzone: settings.deadzone,
            },
        }
    }
}

/// `input → bindings` index.
#[derive(Clone, Debug, Default)]
pub struct BindingRegistry {
    by_input: HashMap<String, Vec<Binding>>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `action` to every input in `inputs`. Existing pairs are kept as-is.
    pub fn bind<S: AsRef<str>>(&mut self, action: &str, inputs: &[S], settings: &BindSettings) {
        for input in inputs {
            let input = input.as_ref();
            let list = self.by_input.entry(input.to_string()).or_default();
            if list.iter().any(|b| b.action == action) {
                continue;
            }
            list.push(Binding::new(input, action, settings));
        }
    }

    /// Drop every binding of `action`.
    pub fn clear(&mut self, action: &str) {
        for list in self.by_input.values_mut() {
            list.retain(|b| b.action != action);
        }
        self.by_input.retain(|_, list| !list.is_empty());
    }

    /// Drop the bindings of `action` on the listed inputs only.
    pub fn remove<S: AsRef<str>>(&mut self, action: &str, inputs: &[S]) {
        for input in inputs {
            let input = input.as_ref();
            if let Some(list) = self.by_input.get_mut(input) {
                list.retain(|b| b.action != action);
                if list.is_empty() {
                    self.by_input.remove(input);
                }
            }
        }
    }

    /// Bindings attached to `input` (empty if none).
    pub fn get(&self, input: &str) -> &[Binding] {
        self.by_input.get(input).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Inputs currently feeding `action`, sorted.
    pub fn inputs_for(&self, action: &str) -> Vec<String> {
        let mut inputs: Vec<String> = self
            .by_input
            .iter()
            .filter(|(_, list)| list.iter().any(|b| b.action == action))
            .map(|(input, _)| input.clone())
            .collect();
        inputs.sort();
        inputs
    }

    /// Whether any input feeds `action`.
    pub fn is_bound(&self, action: &str) -> bool {
        self.by_input
            .values()
            .any(|list| list.iter().any(|b| b.action == action))
    }

    pub fn is_empty(&self) -> bool {
        self.by_input.is_empty()
    }
}
