//! Error types for the configuration boundary.
//!
//! Dispatch itself never fails: unknown inputs are keys, missing entries are no-ops.
//! Errors only surface when text (profiles, setting names) is turned into typed values.

use thiserror::Error;

/// A setting name that does not correspond to a known value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown axis condition `{0}` (expected pos, neg, any, either, deadzone or none)")]
    UnknownCondition(String),

    #[error("unknown frequency `{0}` (expected continuous, change or repeat)")]
    UnknownFrequency(String),
}

/// Failure to read a [`BindingProfile`](crate::profile::BindingProfile).
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid TOML binding profile: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON binding profile: {0}")]
    Json(#[from] serde_json::Error),
}
