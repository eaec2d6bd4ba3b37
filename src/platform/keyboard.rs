//! Keyboard mapping
//!
//! Translates DOM `KeyboardEvent.key` names into the held control set and the
//! one-shot command slot.

use crate::sim::input::{Command, Controls, InputSnapshot};

/// What a key does in-game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Hold(HeldKey),
    Command(Command),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeldKey {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

/// Map a DOM key name; `None` for keys the game ignores
pub fn map_key(key: &str) -> Option<KeyAction> {
    let action = match key {
        "ArrowUp" => KeyAction::Hold(HeldKey::Up),
        "ArrowDown" => KeyAction::Hold(HeldKey::Down),
        "ArrowLeft" => KeyAction::Hold(HeldKey::Left),
        "ArrowRight" => KeyAction::Hold(HeldKey::Right),
        " " => KeyAction::Hold(HeldKey::Fire),
        "q" | "Q" => KeyAction::Command(Command::CycleWeapon),
        "i" | "I" => KeyAction::Command(Command::ToggleAutopilot),
        _ => return None,
    };
    Some(action)
}

fn set_held(controls: &mut Controls, key: HeldKey, down: bool) {
    match key {
        HeldKey::Up => controls.up = down,
        HeldKey::Down => controls.down = down,
        HeldKey::Left => controls.left = down,
        HeldKey::Right => controls.right = down,
        HeldKey::Fire => controls.fire = down,
    }
}

/// Apply a keydown. Auto-repeat is ignored for commands so holding `q` cycles
/// once. Returns true if the key belongs to the game (caller should
/// `prevent_default`).
pub fn key_down(input: &mut InputSnapshot, key: &str, repeat: bool) -> bool {
    match map_key(key) {
        Some(KeyAction::Hold(held)) => {
            set_held(&mut input.held, held, true);
            true
        }
        Some(KeyAction::Command(command)) => {
            if !repeat {
                input.push_command(command);
            }
            true
        }
        None => false,
    }
}

/// Apply a keyup
pub fn key_up(input: &mut InputSnapshot, key: &str) -> bool {
    match map_key(key) {
        Some(KeyAction::Hold(held)) => {
            set_held(&mut input.held, held, false);
            true
        }
        Some(KeyAction::Command(_)) => true,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_track_down_and_up() {
        let mut input = InputSnapshot::default();
        assert!(key_down(&mut input, "ArrowLeft", false));
        assert!(key_down(&mut input, " ", false));
        assert!(input.held.left && input.held.fire);

        assert!(key_up(&mut input, "ArrowLeft"));
        assert!(!input.held.left && input.held.fire);
    }

    #[test]
    fn test_commands_fill_pending_slot() {
        let mut input = InputSnapshot::default();
        key_down(&mut input, "Q", false);
        assert_eq!(input.take_command(), Some(Command::CycleWeapon));

        key_down(&mut input, "i", false);
        key_down(&mut input, "i", true);
        assert_eq!(input.take_command(), Some(Command::ToggleAutopilot));
        assert_eq!(input.take_command(), None);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut input = InputSnapshot::default();
        assert!(!key_down(&mut input, "x", false));
        assert!(!key_up(&mut input, "Enter"));
        assert_eq!(input.held, Controls::default());
        assert_eq!(input.take_command(), None);
    }
}
