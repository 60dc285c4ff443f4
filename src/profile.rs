//! Declarative binding profiles.
//!
//! A [`BindingProfile`] describes a set of `bind` calls as data, so a host can ship its
//! default controls (or per-player presets) as TOML or JSON instead of code:
//!
//! ```toml
//! name = "default"
//! description = "Keyboard + pad"
//!
//! [[bindings]]
//! action = "jump"
//! inputs = ["space", "gp-b0"]
//!
//! [[bindings]]
//! action = "move_right"
//! inputs = ["gp-a-left"]
//! settings = { condition_x = "pos", condition_y = "none", deadzone = 0.2 }
//! ```
//!
//! Profiles are read-only input: applying one calls
//! [`ActionManager::bind`](crate::manager::ActionManager::bind) for each entry, and
//! nothing is ever written back.

use crate::binding::BindSettings;
use crate::errors::ProfileError;
use serde::Deserialize;

/// One `bind(action, inputs, settings)` call.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProfileBinding {
    pub action: String,
    pub inputs: Vec<String>,
    #[serde(default)]
    pub settings: BindSettings,
}

/// Named collection of bindings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BindingProfile {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub bindings: Vec<ProfileBinding>,
}

impl BindingProfile {
    pub fn from_toml_str(text: &str) -> Result<Self, ProfileError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Distinct action names mentioned by the profile, in first-seen order.
    pub fn actions(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.bindings {
            if !seen.contains(&entry.action.as_str()) {
                seen.push(&entry.action);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisCondition;

    const TOML: &str = r#"
name = "default"

[[bindings]]
action = "jump"
inputs = ["space", "gp-b0"]

[[bindings]]
action = "save"
inputs = ["s"]
settings = { ctrl = true }

[[bindings]]
action = "move_right"
inputs = ["gp-a-left"]
settings = { condition_x = "pos", condition_y = "none", deadzone = 0.25 }
"#;

    #[test]
    fn parses_toml() {
        let profile = BindingProfile::from_toml_str(TOML).unwrap();
        assert_eq!(profile.name, "default");
        assert_eq!(profile.description, None);
        assert_eq!(profile.bindings.len(), 3);
        assert_eq!(profile.bindings[0].settings, BindSettings::default());
        assert!(profile.bindings[1].settings.ctrl);
        let stick = &profile.bindings[2].settings;
        assert_eq!(stick.condition_x, AxisCondition::Pos);
        assert_eq!(stick.condition_y, AxisCondition::Ignore);
        assert_eq!(stick.deadzone, 0.25);
        assert_eq!(profile.actions(), vec!["jump", "save", "move_right"]);
    }

    #[test]
    fn parses_json() {
        let profile = BindingProfile::from_json_str(
            r#"{"name": "pad", "description": "pad only",
                "bindings": [{"action": "fire", "inputs": ["gp-b1"], "settings": {"none": true}}]}"#,
        )
        .unwrap();
        assert_eq!(profile.description.as_deref(), Some("pad only"));
        assert!(profile.bindings[0].settings.none);
    }

    #[test]
    fn rejects_unknown_condition() {
        let err = BindingProfile::from_toml_str(
            "name = \"x\"\n[[bindings]]\naction = \"a\"\ninputs = [\"gp-a-left\"]\nsettings = { condition_x = \"up\" }\n",
        )
        .unwrap_err();
        assert!(matches!(err, ProfileError::Toml(_)));
    }

    #[test]
    fn missing_name_is_an_error() {
        assert!(matches!(
            BindingProfile::from_json_str(r#"{"bindings": []}"#),
            Err(ProfileError::Json(_))
        ));
    }
}
