//! Stick conditions.
//!
//! A stick binding only fires while its `(x, y)` reading satisfies a per-axis
//! [`AxisCondition`]. Evaluation is a pure function of the reading, the conditions and
//! the binding's deadzone; see [`AxisConditions::evaluate`].
//!
//! | condition  | passes when                       |
//! |------------|-----------------------------------|
//! | `pos`      | `v >= deadzone`                   |
//! | `neg`      | `v <= -deadzone`                  |
//! | `either`   | `|v| > deadzone`                  |
//! | `deadzone` | `|v| <= deadzone`                 |
//! | `none`     | always                            |
//! | `any`      | always, unless both axes are `any` and both rest inside the deadzone |

use crate::errors::ParseError;
use serde::Deserialize;
use std::str::FromStr;

/// Rest zone used to detect a stick returning to center, independent of bindings.
pub const RELEASE_DEADZONE: f32 = 0.1;

/// Deadzone applied to stick bindings that do not specify one.
pub const DEFAULT_DEADZONE: f32 = 0.1;

/// Which stick pair of a gamepad a binding reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stick {
    /// Primary (left) stick.
    Left,
    /// Secondary (right) stick.
    Right,
}

impl Stick {
    pub const ALL: [Stick; 2] = [Stick::Left, Stick::Right];

    /// Input identifier of this stick.
    pub fn input_name(self) -> &'static str {
        match self {
            Stick::Left => crate::binding::STICK_LEFT,
            Stick::Right => crate::binding::STICK_RIGHT,
        }
    }
}

/// Per-axis pass rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisCondition {
    Pos,
    Neg,
    #[default]
    Any,
    Either,
    Deadzone,
    /// Axis is ignored.
    #[serde(rename = "none")]
    Ignore,
}

impl FromStr for AxisCondition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pos" => Ok(AxisCondition::Pos),
            "neg" => Ok(AxisCondition::Neg),
            "any" => Ok(AxisCondition::Any),
            "either" => Ok(AxisCondition::Either),
            "deadzone" => Ok(AxisCondition::Deadzone),
            "none" => Ok(AxisCondition::Ignore),
            other => Err(ParseError::UnknownCondition(other.to_string())),
        }
    }
}

#[inline]
fn at_rest(v: f32, deadzone: f32) -> bool {
    v.abs() < deadzone
}

/// `true` when both components sit inside the fixed release rest zone.
#[inline]
pub fn is_centered(x: f32, y: f32) -> bool {
    at_rest(x, RELEASE_DEADZONE) && at_rest(y, RELEASE_DEADZONE)
}

impl AxisCondition {
    fn passes(self, v: f32, deadzone: f32) -> bool {
        match self {
            AxisCondition::Pos => v >= deadzone,
            AxisCondition::Neg => v <= -deadzone,
            AxisCondition::Either => v.abs() > deadzone,
            AxisCondition::Deadzone => v.abs() <= deadzone,
            // Resting `any` axes are resolved jointly in `AxisConditions::evaluate`.
            AxisCondition::Ignore | AxisCondition::Any => true,
        }
    }
}

/// Condition pair plus deadzone carried by a stick binding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisConditions {
    pub x: AxisCondition,
    pub y: AxisCondition,
    pub deadzone: f32,
}

impl Default for AxisConditions {
    fn default() -> Self {
        Self {
            x: AxisCondition::Any,
            y: AxisCondition::Any,
            deadzone: DEFAULT_DEADZONE,
        }
    }
}

impl AxisConditions {
    /// Decide whether a stick reading activates the binding.
    pub fn evaluate(&self, x: f32, y: f32) -> bool {
        let dz = self.deadzone;
        if self.x == AxisCondition::Any
            && self.y == AxisCondition::Any
            && at_rest(x, dz)
            && at_rest(y, dz)
        {
            return false;
        }
        self.x.passes(x, dz) && self.y.passes(y, dz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond(x: AxisCondition, y: AxisCondition) -> AxisConditions {
        AxisConditions {
            x,
            y,
            deadzone: 0.1,
        }
    }

    #[test]
    fn pos_with_ignored_y() {
        let c = cond(AxisCondition::Pos, AxisCondition::Ignore);
        assert!(c.evaluate(0.5, -0.9));
        assert!(!c.evaluate(0.05, 0.9));
        assert!(!c.evaluate(-0.5, 0.9));
    }

    #[test]
    fn neg_and_either() {
        let c = cond(AxisCondition::Neg, AxisCondition::Either);
        assert!(c.evaluate(-0.3, 0.4));
        assert!(c.evaluate(-0.3, -0.4));
        assert!(!c.evaluate(-0.3, 0.05));
        assert!(!c.evaluate(0.3, 0.4));
    }

    #[test]
    fn deadzone_condition_wants_rest() {
        let c = cond(AxisCondition::Deadzone, AxisCondition::Ignore);
        assert!(c.evaluate(0.0, 1.0));
        assert!(c.evaluate(0.1, 0.0));
        assert!(!c.evaluate(0.2, 0.0));
    }

    #[test]
    fn any_fails_only_when_both_rest() {
        let c = AxisConditions::default();
        assert!(!c.evaluate(0.0, 0.0));
        assert!(!c.evaluate(0.05, -0.05));
        assert!(c.evaluate(0.5, 0.0));
        assert!(c.evaluate(0.0, -0.5));
    }

    #[test]
    fn any_inside_deadzone_defers_to_other_axis() {
        let c = cond(AxisCondition::Any, AxisCondition::Pos);
        assert!(c.evaluate(0.0, 0.5));
        assert!(!c.evaluate(0.0, -0.5));
        assert!(!c.evaluate(0.0, 0.0));
    }

    #[test]
    fn condition_names_parse() {
        assert_eq!("none".parse::<AxisCondition>().unwrap(), AxisCondition::Ignore);
        assert_eq!("either".parse::<AxisCondition>().unwrap(), AxisCondition::Either);
        assert_eq!(
            "up".parse::<AxisCondition>(),
            Err(ParseError::UnknownCondition("up".into()))
        );
    }

    #[test]
    fn centered_uses_fixed_zone() {
        assert!(is_centered(0.0, 0.09));
        assert!(!is_centered(0.0, 0.1));
        assert!(!is_centered(-0.5, 0.0));
    }
}
