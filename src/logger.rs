use crate::commands::Commands;
use crate::event::ActionEvent;
use crate::eventbus::ActionListener;

/// A listener that logs every action it receives at `info` level.
#[derive(Debug, Default)]
pub struct LogListener;

impl LogListener {
    pub fn new() -> Self {
        LogListener
    }
}

impl ActionListener for LogListener {
    fn on_action(&mut self, event: &ActionEvent<'_>, _commands: &mut Commands) {
        match event.axes {
            Some((x, y)) => log::info!(
                "[Action] {} <- {} {} ({:.2}, {:.2})",
                event.action,
                event.input_name,
                event.key_action,
                x,
                y
            ),
            None => log::info!(
                "[Action] {} <- {} {}",
                event.action,
                event.input_name,
                event.key_action
            ),
        }
    }
}
