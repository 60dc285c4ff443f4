//! Predicate gating for listeners, built with [`ActionListener::only_when`].

use crate::commands::Commands;
use crate::event::ActionEvent;
use crate::eventbus::ActionListener;

/// A listener that only sees the occurrences its predicate accepts.
///
/// Rejected occurrences still count against the callback's expiry, since the
/// registry charges the wrapper, not the inner listener.
pub struct FilteredListener<L, P> {
    inner: L,
    predicate: P,
}

impl<L, P> FilteredListener<L, P>
where
    L: ActionListener,
    P: Fn(&ActionEvent<'_>) -> bool,
{
    pub fn new(inner: L, predicate: P) -> Self {
        Self { inner, predicate }
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L, P> ActionListener for FilteredListener<L, P>
where
    L: ActionListener,
    P: Fn(&ActionEvent<'_>) -> bool,
{
    fn on_action(&mut self, event: &ActionEvent<'_>, commands: &mut Commands) {
        if (self.predicate)(event) {
            self.inner.on_action(event, commands);
        }
    }
}
