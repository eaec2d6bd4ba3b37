//! Per-frame input snapshot
//!
//! Held controls are level-triggered and read every step. One-shot actions
//! (weapon cycling, autopilot toggle) travel through a single pending-command
//! slot that the input collaborator fills and the simulation drains.

use serde::{Deserialize, Serialize};

/// Currently-held logical controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// One-shot command, consumed exactly once by the next simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    CycleWeapon,
    ToggleAutopilot,
}

/// Input state handed to the simulation each frame
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pub held: Controls,
    pending: Option<Command>,
}

impl InputSnapshot {
    pub fn new(held: Controls) -> Self {
        Self {
            held,
            pending: None,
        }
    }

    /// Buffer a one-shot command (the most recent press wins)
    pub fn push_command(&mut self, command: Command) {
        self.pending = Some(command);
    }

    /// Drain the buffered command
    pub fn take_command(&mut self) -> Option<Command> {
        self.pending.take()
    }

    /// Drop any buffered command without acting on it
    pub fn clear_command(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_drains_once() {
        let mut input = InputSnapshot::default();
        input.push_command(Command::CycleWeapon);
        assert_eq!(input.take_command(), Some(Command::CycleWeapon));
        assert_eq!(input.take_command(), None);
    }

    #[test]
    fn test_cleared_command_is_dropped() {
        let mut input = InputSnapshot::default();
        input.push_command(Command::ToggleAutopilot);
        input.clear_command();
        assert_eq!(input.take_command(), None);
    }

    #[test]
    fn test_latest_command_wins() {
        let mut input = InputSnapshot::default();
        input.push_command(Command::CycleWeapon);
        input.push_command(Command::ToggleAutopilot);
        assert_eq!(input.take_command(), Some(Command::ToggleAutopilot));
    }
}
