//! Deferred registry changes requested from inside callbacks.

use crate::binding::BindSettings;
use crate::event::ActionEvent;
use crate::eventbus::{ActionListener, CallbackId, CallbackSettings, IdAllocator};

pub(crate) enum Command {
    Bind {
        action: String,
        inputs: Vec<String>,
        settings: BindSettings,
    },
    Remove {
        action: String,
        inputs: Vec<String>,
    },
    Clear(String),
    On {
        id: CallbackId,
        action: String,
        listener: Box<dyn ActionListener>,
        settings: CallbackSettings,
    },
    Off(CallbackId),
}

/// Queue handed to callbacks. Applied in order once the dispatch pass completes.
#[derive(Default)]
pub struct Commands {
    queue: Vec<Command>,
    ids: IdAllocator,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue whose `on` ids come from the same counter as a registry's.
    pub(crate) fn sharing(ids: IdAllocator) -> Self {
        Self {
            queue: Vec::new(),
            ids,
        }
    }

    pub fn bind<S: AsRef<str>>(&mut self, action: &str, inputs: &[S], settings: BindSettings) {
        self.queue.push(Command::Bind {
            action: action.to_string(),
            inputs: inputs.iter().map(|i| i.as_ref().to_string()).collect(),
            settings,
        });
    }

    pub fn remove<S: AsRef<str>>(&mut self, action: &str, inputs: &[S]) {
        self.queue.push(Command::Remove {
            action: action.to_string(),
            inputs: inputs.iter().map(|i| i.as_ref().to_string()).collect(),
        });
    }

    pub fn clear(&mut self, action: &str) {
        self.queue.push(Command::Clear(action.to_string()));
    }

    /// Register a callback once the pass ends. The returned id is valid for
    /// [`off`](Self::off) straight away, including later in this same pass.
    pub fn on<F>(&mut self, action: &str, callback: F, settings: CallbackSettings) -> CallbackId
    where
        F: FnMut(&ActionEvent<'_>, &mut Commands) + 'static,
    {
        self.add_listener(action, callback, settings)
    }

    pub fn add_listener<L: ActionListener + 'static>(
        &mut self,
        action: &str,
        listener: L,
        settings: CallbackSettings,
    ) -> CallbackId {
        let id = self.ids.allocate();
        self.queue.push(Command::On {
            id,
            action: action.to_string(),
            listener: Box::new(listener),
            settings,
        });
        id
    }

    pub fn off(&mut self, id: CallbackId) {
        self.queue.push(Command::Off(id));
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub(crate) fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.queue)
    }
}
