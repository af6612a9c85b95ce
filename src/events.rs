//! Keybindings: Tab/Up/Down focus, Left/Right/Space change, Enter submit, Ctrl+R check API, Esc quit.

use crate::actions::Action;
use crate::state::Field;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

pub const TICK_RATE: Duration = Duration::from_millis(80);

pub fn key_to_action(event: &KeyEvent, focus: Field) -> Option<Action> {
    // Accept Press and Repeat (hold key); ignore Release so we don't double-handle.
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let (code, mods) = (event.code, event.modifiers);
    let ctrl = mods.contains(KeyModifiers::CONTROL);

    match code {
        KeyCode::Char('c') if ctrl => return Some(Action::Quit),
        KeyCode::Char('l') if ctrl => return Some(Action::ClearField),
        KeyCode::Char('r') if ctrl => return Some(Action::CheckApi),
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Enter => return Some(Action::Submit),
        KeyCode::Tab | KeyCode::Down => return Some(Action::FocusNext),
        KeyCode::BackTab | KeyCode::Up => return Some(Action::FocusPrev),
        _ => {}
    }

    if focus.is_text() {
        return match code {
            KeyCode::Backspace => Some(Action::Backspace),
            // Allow Alt for accented chars; only block Ctrl/Cmd.
            KeyCode::Char(c) if !ctrl && !mods.contains(KeyModifiers::SUPER) => Some(Action::Char(c)),
            _ => None,
        };
    }

    match code {
        KeyCode::Right => Some(Action::CycleNext),
        KeyCode::Left => Some(Action::CyclePrev),
        KeyCode::Char(' ') if focus.is_toggle() || focus.is_select() => Some(Action::CycleNext),
        _ => None,
    }
}
