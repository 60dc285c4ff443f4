//! Callback registry.
//!
//! Callbacks are registered per action name and invoked in registration order. Each
//! record carries its own expiry budget and delivery frequency, plus an enabled flag so
//! it can be muted without losing its place.

use crate::binding::Binding;
use crate::commands::Commands;
use crate::event::{ActionEvent, DeliveryContext, Frequency, InputKind, KeyAction, KeyEvent};
use crate::filtered_listener::FilteredListener;
use crate::snapshot::GamepadSnapshot;
use serde::{Deserialize, Deserializer};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

/// Trait for reacting to action occurrences.
///
/// Implemented for every `FnMut(&ActionEvent, &mut Commands)` closure. Changes to
/// bindings or callbacks made from inside a callback go through `commands` and take
/// effect once the current dispatch pass is over.
pub trait ActionListener {
    fn on_action(&mut self, event: &ActionEvent<'_>, commands: &mut Commands);

    /// Wrap this listener so it only sees occurrences `predicate` accepts.
    fn only_when<P>(self, predicate: P) -> FilteredListener<Self, P>
    where
        Self: Sized,
        P: Fn(&ActionEvent<'_>) -> bool,
    {
        FilteredListener::new(self, predicate)
    }
}

impl<F> ActionListener for F
where
    F: FnMut(&ActionEvent<'_>, &mut Commands),
{
    fn on_action(&mut self, event: &ActionEvent<'_>, commands: &mut Commands) {
        self(event, commands)
    }
}

/// Handle returned when a callback is registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(pub u64);

/// Callback id counter, shared between a registry and the [`Commands`] queue feeding it.
#[derive(Clone, Debug, Default)]
pub(crate) struct IdAllocator(Rc<Cell<u64>>);

impl IdAllocator {
    pub fn allocate(&self) -> CallbackId {
        let id = self.0.get();
        self.0.set(id + 1);
        CallbackId(id)
    }
}

/// Options accepted by `on`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CallbackSettings {
    /// Invocations before the callback is removed; `0` keeps it forever.
    pub expiry: u32,
    /// `None` picks the default for the binding's input kind.
    #[serde(deserialize_with = "lenient_frequency")]
    pub frequency: Option<Frequency>,
}

impl CallbackSettings {
    pub fn expiry(mut self, expiry: u32) -> Self {
        self.expiry = expiry;
        self
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }
}

// Unrecognized frequency names fall back to the per-kind default.
fn lenient_frequency<'de, D>(deserializer: D) -> Result<Option<Frequency>, D::Error>
where
    D: Deserializer<'de>,
{
    let name: Option<String> = Option::deserialize(deserializer)?;
    Ok(name.and_then(|n| n.parse().ok()))
}

/// One raw occurrence on its way to callbacks.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Occurrence<'a> {
    pub input: &'a str,
    pub key_action: KeyAction,
    pub event: Option<&'a KeyEvent>,
    pub gamepad: Option<&'a GamepadSnapshot>,
    pub context: DeliveryContext,
}

struct CallbackRecord {
    id: CallbackId,
    listener: Box<dyn ActionListener>,
    /// Invocations left; `0` means unlimited.
    remaining: u32,
    frequency: Option<Frequency>,
    enabled: bool,
}

/// `action → callbacks` index.
#[derive(Default)]
pub struct CallbackRegistry {
    ids: IdAllocator,
    by_action: HashMap<String, Vec<CallbackRecord>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a callback to `action`'s list.
    pub fn add(
        &mut self,
        action: &str,
        listener: Box<dyn ActionListener>,
        settings: CallbackSettings,
    ) -> CallbackId {
        let id = self.ids.allocate();
        self.insert(id, action, listener, settings);
        id
    }

    /// Register under an id handed out earlier by [`ids`](Self::ids).
    pub(crate) fn insert(
        &mut self,
        id: CallbackId,
        action: &str,
        listener: Box<dyn ActionListener>,
        settings: CallbackSettings,
    ) {
        self.by_action
            .entry(action.to_string())
            .or_default()
            .push(CallbackRecord {
                id,
                listener,
                remaining: settings.expiry,
                frequency: settings.frequency,
                enabled: true,
            });
    }

    pub(crate) fn ids(&self) -> IdAllocator {
        self.ids.clone()
    }

    /// Unregister a callback. Returns `false` if it was not registered.
    pub fn remove(&mut self, id: CallbackId) -> bool {
        let mut found = false;
        for list in self.by_action.values_mut() {
            let before = list.len();
            list.retain(|r| r.id != id);
            found |= list.len() != before;
        }
        self.by_action.retain(|_, list| !list.is_empty());
        found
    }

    /// Mute or unmute a callback. Returns `false` if it was not registered.
    pub fn set_enabled(&mut self, id: CallbackId, enabled: bool) -> bool {
        match self.find_mut(id) {
            Some(record) => {
                record.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Number of callbacks registered under `action`.
    pub fn count(&self, action: &str) -> usize {
        self.by_action.get(action).map_or(0, Vec::len)
    }

    /// Remaining budget of a callback (`0` = unlimited), if registered.
    pub fn remaining(&self, id: CallbackId) -> Option<u32> {
        self.by_action
            .values()
            .flatten()
            .find(|r| r.id == id)
            .map(|r| r.remaining)
    }

    fn find_mut(&mut self, id: CallbackId) -> Option<&mut CallbackRecord> {
        self.by_action.values_mut().flatten().find(|r| r.id == id)
    }

    /// Invoke every callback of `binding.action` whose frequency matches the occurrence.
    ///
    /// The id list is captured up front; records removed mid-pass are skipped.
    /// Returns the number of invocations.
    pub(crate) fn deliver(
        &mut self,
        binding: &Binding,
        occurrence: &Occurrence<'_>,
        commands: &mut Commands,
    ) -> usize {
        let ids: Vec<CallbackId> = match self.by_action.get(&binding.action) {
            Some(list) => list.iter().map(|r| r.id).collect(),
            None => return 0,
        };

        let axes = match binding.kind {
            InputKind::GamepadAxes => occurrence.gamepad.map(|pad| pad.stick(binding.stick)),
            _ => None,
        };

        let mut invoked = 0;
        for id in ids {
            let Some(list) = self.by_action.get_mut(&binding.action) else {
                break;
            };
            let Some(pos) = list.iter().position(|r| r.id == id) else {
                continue;
            };
            let record = &mut list[pos];
            if !record.enabled {
                continue;
            }

            let frequency = record
                .frequency
                .unwrap_or_else(|| Frequency::default_for(binding.kind));
            if !frequency.fires_on(binding.kind, occurrence.context) {
                continue;
            }

            let event = ActionEvent {
                action: &binding.action,
                input_name: occurrence.input,
                input_type: binding.kind,
                key_action: occurrence.key_action,
                event: occurrence.event,
                gamepad: occurrence.gamepad,
                expiry: record.remaining,
                frequency,
                context: occurrence.context,
                axes,
            };
            record.listener.on_action(&event, commands);
            invoked += 1;

            if record.remaining > 0 {
                record.remaining -= 1;
                if record.remaining == 0 {
                    list.remove(pos);
                    if list.is_empty() {
                        self.by_action.remove(&binding.action);
                    }
                    log::debug!(
                        "callback {} for action `{}` expired",
                        id.0,
                        binding.action
                    );
                }
            }
        }
        invoked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::BindSettings;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn key_occurrence(context: DeliveryContext) -> Occurrence<'static> {
        Occurrence {
            input: "space",
            key_action: KeyAction::Pressed,
            event: None,
            gamepad: None,
            context,
        }
    }

    fn boxed<F>(f: F) -> Box<dyn ActionListener>
    where
        F: FnMut(&ActionEvent<'_>, &mut Commands) + 'static,
    {
        Box::new(f)
    }

    fn counter(hits: &Rc<RefCell<u32>>) -> Box<dyn ActionListener> {
        let hits = hits.clone();
        boxed(move |_, _| *hits.borrow_mut() += 1)
    }

    #[test]
    fn default_frequency_for_key_is_repeat() {
        let mut reg = CallbackRegistry::new();
        let hits = Rc::new(RefCell::new(0));
        reg.add("jump", counter(&hits), CallbackSettings::default());
        let binding = Binding::new("space", "jump", &BindSettings::default());
        let mut commands = Commands::new();

        reg.deliver(&binding, &key_occurrence(DeliveryContext::Change), &mut commands);
        assert_eq!(*hits.borrow(), 0);
        reg.deliver(&binding, &key_occurrence(DeliveryContext::Repeat), &mut commands);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn expiry_removes_record() {
        let mut reg = CallbackRegistry::new();
        let hits = Rc::new(RefCell::new(0));
        let id = reg.add(
            "jump",
            counter(&hits),
            CallbackSettings::default().expiry(2),
        );
        let binding = Binding::new("space", "jump", &BindSettings::default());
        let mut commands = Commands::new();
        let occ = key_occurrence(DeliveryContext::Repeat);

        assert_eq!(reg.remaining(id), Some(2));
        reg.deliver(&binding, &occ, &mut commands);
        assert_eq!(reg.remaining(id), Some(1));
        reg.deliver(&binding, &occ, &mut commands);
        assert_eq!(reg.remaining(id), None);
        assert_eq!(reg.deliver(&binding, &occ, &mut commands), 0);
        assert_eq!(*hits.borrow(), 2);
        assert_eq!(reg.count("jump"), 0);
    }

    #[test]
    fn invoked_in_registration_order() {
        let mut reg = CallbackRegistry::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for n in 0..3 {
            let order = order.clone();
            reg.add(
                "jump",
                boxed(move |_, _| order.borrow_mut().push(n)),
                CallbackSettings::default(),
            );
        }
        let binding = Binding::new("space", "jump", &BindSettings::default());
        reg.deliver(
            &binding,
            &key_occurrence(DeliveryContext::Repeat),
            &mut Commands::new(),
        );
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn disabled_record_is_skipped() {
        let mut reg = CallbackRegistry::new();
        let hits = Rc::new(RefCell::new(0));
        let id = reg.add("jump", counter(&hits), CallbackSettings::default().expiry(1));
        assert!(reg.set_enabled(id, false));
        let binding = Binding::new("space", "jump", &BindSettings::default());
        reg.deliver(
            &binding,
            &key_occurrence(DeliveryContext::Repeat),
            &mut Commands::new(),
        );
        assert_eq!(*hits.borrow(), 0);
        assert_eq!(reg.remaining(id), Some(1));
    }

    #[test]
    fn remove_by_id() {
        let mut reg = CallbackRegistry::new();
        let hits = Rc::new(RefCell::new(0));
        let a = reg.add("jump", counter(&hits), CallbackSettings::default());
        let b = reg.add("jump", counter(&hits), CallbackSettings::default());
        assert!(reg.remove(a));
        assert!(!reg.remove(a));
        assert_eq!(reg.count("jump"), 1);
        assert!(reg.remove(b));
        assert_eq!(reg.count("jump"), 0);
    }

    #[test]
    fn settings_tolerate_unknown_frequency() {
        let s: CallbackSettings = serde_json::from_str(r#"{"frequency": "often"}"#).unwrap();
        assert_eq!(s.frequency, None);
        let s: CallbackSettings =
            serde_json::from_str(r#"{"expiry": 3, "frequency": "change"}"#).unwrap();
        assert_eq!(s.expiry, 3);
        assert_eq!(s.frequency, Some(Frequency::Change));
    }
}
