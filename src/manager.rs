//! The action manager: owns every registry and drives dispatch.
//!
//! Two kinds of entry point feed it:
//! - [`ActionManager::key_event`] (and the `key_down`/`key_up` shorthands), called by the
//!   host whenever the keyboard reports something;
//! - [`ActionManager::update`], called once per frame, which re-affirms held keys and
//!   polls every connected gamepad through the configured [`GamepadSource`].
//!
//! # Example
//! ```
//! use bindery::{ActionManager, BindSettings, CallbackSettings, Frequency, Modifiers};
//!
//! let mut mgr = ActionManager::new();
//! mgr.bind("jump", &["space", "gp-b0"], BindSettings::default());
//! mgr.on(
//!     "jump",
//!     |ev, _| println!("{} {}", ev.input_name, ev.key_action),
//!     CallbackSettings::default().frequency(Frequency::Change),
//! );
//! mgr.key_down("space", Modifiers::NONE);
//! mgr.key_up("space", Modifiers::NONE);
//! ```

use crate::axis::Stick;
use crate::binding::{button_input, BindSettings, Binding, BindingRegistry, ANY_INPUT};
use crate::commands::{Command, Commands};
use crate::device::{GamepadConnection, GamepadSource};
use crate::event::{ActionEvent, DeliveryContext, InputKind, KeyAction, KeyEvent, Modifiers};
use crate::eventbus::{ActionListener, CallbackId, CallbackRegistry, CallbackSettings, Occurrence};
use crate::profile::BindingProfile;
use crate::snapshot::GamepadSnapshot;
use crate::tracker::InputStateTracker;
use log::{debug, info, trace, warn};
use std::collections::BTreeSet;

/// Maps raw keyboard and gamepad input to named actions and their callbacks.
///
/// Every instance owns its registries; nothing is shared between managers.
///
/// # Panics
/// Callbacks run synchronously inside `key_event` and `update`. A panicking callback
/// unwinds straight to the caller, skipping the remaining callbacks of that pass and
/// discarding any [`Commands`] it queued.
pub struct ActionManager {
    bindings: BindingRegistry,
    callbacks: CallbackRegistry,
    tracker: InputStateTracker,
    gamepads: BTreeSet<usize>,
    /// Connected indices the source had no state for at the last poll.
    unreadable: BTreeSet<usize>,
    source: Option<Box<dyn GamepadSource>>,
    commands: Commands,
}

impl Default for ActionManager {
    fn default() -> Self {
        let callbacks = CallbackRegistry::new();
        let commands = Commands::sharing(callbacks.ids());
        Self {
            bindings: BindingRegistry::default(),
            callbacks,
            tracker: InputStateTracker::default(),
            gamepads: BTreeSet::new(),
            unreadable: BTreeSet::new(),
            source: None,
            commands,
        }
    }
}

impl ActionManager {
    /// Manager without a gamepad source; only keyboard input is delivered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager that polls `source` on every [`update`](Self::update).
    pub fn with_source<S: GamepadSource + 'static>(source: S) -> Self {
        let mut manager = Self::new();
        manager.set_source(source);
        manager
    }

    /// Manager using the best gamepad backend compiled in, if any.
    pub fn discover() -> Self {
        let mut manager = Self::new();
        manager.source = crate::backends::probe_source();
        manager
    }

    pub fn set_source<S: GamepadSource + 'static>(&mut self, source: S) {
        self.source = Some(Box::new(source));
    }

    // --- bindings -------------------------------------------------------

    /// Bind `action` to each of `inputs`. Pairs that already exist are left alone.
    pub fn bind<S: AsRef<str>>(&mut self, action: &str, inputs: &[S], settings: BindSettings) {
        self.bindings.bind(action, inputs, &settings);
    }

    /// Unbind `action` from the listed inputs only.
    pub fn remove<S: AsRef<str>>(&mut self, action: &str, inputs: &[S]) {
        self.bindings.remove(action, inputs);
    }

    /// Unbind `action` from every input. Callbacks stay registered.
    pub fn clear(&mut self, action: &str) {
        self.bindings.clear(action);
    }

    /// Bind everything described by `profile`.
    pub fn apply_profile(&mut self, profile: &BindingProfile) {
        for entry in &profile.bindings {
            self.bindings.bind(&entry.action, &entry.inputs, &entry.settings);
        }
        info!(
            "applied binding profile `{}` ({} entries)",
            profile.name,
            profile.bindings.len()
        );
    }

    pub fn bindings_for(&self, input: &str) -> &[Binding] {
        self.bindings.get(input)
    }

    pub fn inputs_for(&self, action: &str) -> Vec<String> {
        self.bindings.inputs_for(action)
    }

    pub fn is_bound(&self, action: &str) -> bool {
        self.bindings.is_bound(action)
    }

    // --- callbacks ------------------------------------------------------

    /// Register a callback for `action`.
    pub fn on<F>(&mut self, action: &str, callback: F, settings: CallbackSettings) -> CallbackId
    where
        F: FnMut(&ActionEvent<'_>, &mut Commands) + 'static,
    {
        self.callbacks.add(action, Box::new(callback), settings)
    }

    /// Register a listener object for `action`.
    pub fn add_listener<L: ActionListener + 'static>(
        &mut self,
        action: &str,
        listener: L,
        settings: CallbackSettings,
    ) -> CallbackId {
        self.callbacks.add(action, Box::new(listener), settings)
    }

    /// Unregister a callback. Returns `false` if it was already gone.
    pub fn off(&mut self, id: CallbackId) -> bool {
        self.callbacks.remove(id)
    }

    /// Mute or unmute a callback without unregistering it.
    pub fn set_enabled(&mut self, id: CallbackId, enabled: bool) -> bool {
        self.callbacks.set_enabled(id, enabled)
    }

    pub fn callback_count(&self, action: &str) -> usize {
        self.callbacks.count(action)
    }

    /// Invocations left for a callback (`0` = unlimited), or `None` once it expired.
    pub fn remaining(&self, id: CallbackId) -> Option<u32> {
        self.callbacks.remaining(id)
    }

    // --- keyboard -------------------------------------------------------

    /// Feed one keyboard notification.
    ///
    /// Edges produce a `change` delivery (plus a `continuous` one on release); every
    /// event, auto-repeat included, produces a `repeat` delivery.
    pub fn key_event(&mut self, event: KeyEvent) {
        let edge = self.tracker.record_key(&event);
        let key_action = event.key_action();

        let occurrence = |context| Occurrence {
            input: &event.key,
            key_action,
            event: Some(&event),
            gamepad: None,
            context,
        };

        if edge {
            self.deliver(occurrence(DeliveryContext::Change), true);
            if key_action == KeyAction::Released {
                self.deliver(occurrence(DeliveryContext::Continuous), true);
            }
        }
        self.deliver(occurrence(DeliveryContext::Repeat), true);
    }

    pub fn key_down(&mut self, key: &str, modifiers: Modifiers) {
        self.key_event(KeyEvent::down(key, modifiers));
    }

    pub fn key_up(&mut self, key: &str, modifiers: Modifiers) {
        self.key_event(KeyEvent::up(key, modifiers));
    }

    // --- gamepads -------------------------------------------------------

    pub fn gamepad_connected(&mut self, index: usize) {
        if self.gamepads.insert(index) {
            info!("gamepad {index} connected");
        }
    }

    /// Stop polling `index` and forget everything recorded for it.
    pub fn gamepad_disconnected(&mut self, index: usize) {
        if self.gamepads.remove(&index) {
            info!("gamepad {index} disconnected");
        }
        self.unreadable.remove(&index);
        self.tracker.forget_gamepad(index);
    }

    /// Connected gamepad indices, ascending.
    pub fn connected_gamepads(&self) -> impl Iterator<Item = usize> + '_ {
        self.gamepads.iter().copied()
    }

    // --- per-frame ------------------------------------------------------

    /// Per-frame poll. Must be called once per frame for held keys and gamepads to
    /// deliver anything beyond raw keyboard events.
    pub fn update(&mut self) {
        let changes = self
            .source
            .as_mut()
            .map(|source| source.drain_connections())
            .unwrap_or_default();
        for change in changes {
            match change {
                GamepadConnection::Connected(index) => self.gamepad_connected(index),
                GamepadConnection::Disconnected(index) => self.gamepad_disconnected(index),
            }
        }

        for event in self.tracker.held_keys() {
            self.deliver(
                Occurrence {
                    input: &event.key,
                    key_action: KeyAction::Pressed,
                    event: Some(&event),
                    gamepad: None,
                    context: DeliveryContext::Continuous,
                },
                true,
            );
        }

        let indices: Vec<usize> = self.gamepads.iter().copied().collect();
        for index in indices {
            let Some(source) = self.source.as_mut() else {
                break;
            };
            match source.read(index) {
                Some(pad) => {
                    self.unreadable.remove(&index);
                    self.poll_gamepad(index, &pad.clamped());
                }
                None if self.unreadable.insert(index) => {
                    warn!("gamepad {index} is connected but its source returned no state");
                }
                None => debug!("gamepad {index} still unreadable"),
            }
        }
    }

    fn poll_gamepad(&mut self, index: usize, pad: &GamepadSnapshot) {
        for (button, &pressed) in pad.buttons.iter().enumerate() {
            let input = button_input(button);
            let edge = self.tracker.record_button(index, button, pressed);
            let key_action = if pressed {
                KeyAction::Pressed
            } else {
                KeyAction::Released
            };
            let occurrence = |context| Occurrence {
                input: &input,
                key_action,
                event: None,
                gamepad: Some(pad),
                context,
            };

            if edge {
                self.deliver(occurrence(DeliveryContext::Change), true);
                if !pressed {
                    self.deliver(occurrence(DeliveryContext::Continuous), true);
                }
            }
            if pressed {
                self.deliver(occurrence(DeliveryContext::Continuous), true);
            }
        }

        for stick in Stick::ALL {
            let update = self.tracker.record_stick(index, stick, pad.stick(stick));
            let occurrence = |key_action, context| Occurrence {
                input: stick.input_name(),
                key_action,
                event: None,
                gamepad: Some(pad),
                context,
            };

            if update.changed {
                self.deliver(occurrence(KeyAction::Pressed, DeliveryContext::Change), false);
            }
            self.deliver(
                occurrence(KeyAction::Pressed, DeliveryContext::Continuous),
                false,
            );
            if update.returned_to_rest {
                self.deliver(occurrence(KeyAction::Released, DeliveryContext::Change), false);
                self.deliver(
                    occurrence(KeyAction::Released, DeliveryContext::Continuous),
                    false,
                );
            }
        }
    }

    // --- dispatch -------------------------------------------------------

    /// One dispatch pass: concrete bindings, then (for keys and buttons) the wildcard,
    /// then any commands callbacks queued.
    ///
    /// A key literally named `any` already hits the wildcard bindings on its own lookup.
    fn deliver(&mut self, occurrence: Occurrence<'_>, wildcard: bool) {
        let mut invoked = self.dispatch(&occurrence, occurrence.input);
        if wildcard && occurrence.input != ANY_INPUT {
            invoked += self.dispatch(&occurrence, ANY_INPUT);
        }
        if invoked > 0 {
            trace!(
                "{} {} ({:?}) -> {invoked} callback(s)",
                occurrence.input,
                occurrence.key_action,
                occurrence.context
            );
        }
        self.apply_commands();
    }

    fn dispatch(&mut self, occurrence: &Occurrence<'_>, lookup: &str) -> usize {
        let bindings = self.bindings.get(lookup).to_vec();
        let held = occurrence.event.map_or(Modifiers::NONE, |e| e.modifiers);
        // Releases skip stick conditions so a return to rest is always delivered.
        let released = occurrence.key_action == KeyAction::Released;

        let mut invoked = 0;
        for binding in &bindings {
            if binding.kind.is_keyboard_like() && !binding.gate.admits(held) {
                continue;
            }
            if binding.kind == InputKind::GamepadAxes && !released {
                let Some(pad) = occurrence.gamepad else {
                    continue;
                };
                let (x, y) = pad.stick(binding.stick);
                if !binding.axis.evaluate(x, y) {
                    continue;
                }
            }
            invoked += self.callbacks.deliver(binding, occurrence, &mut self.commands);
        }
        invoked
    }

    fn apply_commands(&mut self) {
        if self.commands.is_empty() {
            return;
        }
        for command in self.commands.take() {
            match command {
                Command::Bind {
                    action,
                    inputs,
                    settings,
                } => self.bindings.bind(&action, &inputs, &settings),
                Command::Remove { action, inputs } => self.bindings.remove(&action, &inputs),
                Command::Clear(action) => self.bindings.clear(&action),
                Command::On {
                    id,
                    action,
                    listener,
                    settings,
                } => {
                    self.callbacks.insert(id, &action, listener, settings);
                    debug!("callback {} registered for `{action}` during dispatch", id.0);
                }
                Command::Off(id) => {
                    self.callbacks.remove(id);
                }
            }
        }
    }
}
