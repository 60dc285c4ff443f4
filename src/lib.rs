//! Bindery: rebindable input-to-action dispatch for Rust.
//!
//! Maps keyboard keys, gamepad buttons and gamepad sticks to named actions, and delivers
//! each action occurrence to registered callbacks at a chosen cadence (`change`,
//! `continuous` or `repeat`). Controls can be remapped at runtime without touching
//! callback code.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod axis;
pub mod backends;
pub mod binding;
pub mod commands;
pub mod device;
pub mod errors;
pub mod event;
pub mod eventbus;
pub mod filtered_listener;
pub mod logger;
pub mod manager;
pub mod profile;
pub mod snapshot;
pub(crate) mod tracker;

pub use axis::{AxisCondition, AxisConditions, Stick};
pub use binding::{BindSettings, Binding};
pub use commands::Commands;
pub use device::*;
pub use errors::*;
pub use event::*;
pub use eventbus::{ActionListener, CallbackId, CallbackSettings};
pub use filtered_listener::FilteredListener;
pub use logger::LogListener;
pub use manager::*;
pub use profile::{BindingProfile, ProfileBinding};
pub use snapshot::GamepadSnapshot;
