use crate::snapshot::GamepadSnapshot;

/// Connection change reported by a [`GamepadSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamepadConnection {
    Connected(usize),
    Disconnected(usize),
}

/// Something the manager can read gamepad state from once per frame.
pub trait GamepadSource {
    /// Current state of gamepad `index`, or `None` if the source cannot read it.
    fn read(&mut self, index: usize) -> Option<GamepadSnapshot>;

    /// Connection changes since the last call.
    fn drain_connections(&mut self) -> Vec<GamepadConnection> {
        Vec::new()
    }
}
