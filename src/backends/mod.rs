//! Gamepad backends for `bindery`.
//!
//! Implementations of [`GamepadSource`](crate::device::GamepadSource) the manager can
//! poll from [`ActionManager::update`](crate::manager::ActionManager::update).
//!
//! # Feature flags
//! - **`gilrs`**: hardware gamepads through the `gilrs` crate.
//!
//! [`virtual_input::VirtualGamepads`] is always available and is what tests and
//! headless hosts use.

use crate::device::GamepadSource;

#[cfg(feature = "gilrs")]
#[cfg_attr(docsrs, doc(cfg(feature = "gilrs")))]
pub mod gilrs_source;
pub mod virtual_input;

/// Best hardware source compiled in, if any.
///
/// Returns `None` when no backend feature is enabled or the backend fails to start.
pub fn probe_source() -> Option<Box<dyn GamepadSource>> {
    #[cfg(feature = "gilrs")]
    {
        match gilrs_source::GilrsSource::new() {
            Ok(source) => return Some(Box::new(source)),
            Err(err) => log::warn!("gilrs backend unavailable: {err}"),
        }
    }

    None
}
