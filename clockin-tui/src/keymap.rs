use clockin_core::{Kiosk, Screen, action::Action};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Resolve a key event into an Action based on the current screen
pub fn resolve_action(key: KeyEvent, kiosk: &Kiosk) -> Option<Action> {
    // Global quit
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match kiosk.screen() {
        Screen::Idle => resolve_idle_key(key, kiosk),
        Screen::Profile { .. } => resolve_profile_key(key.code),
        Screen::Success { .. } | Screen::Error { .. } => resolve_terminal_key(key.code),
    }
}

fn resolve_idle_key(key: KeyEvent, kiosk: &Kiosk) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('w') | KeyCode::Backspace => Some(Action::InputDeleteWord),
            KeyCode::Char('u') => Some(Action::InputClear),
            KeyCode::Char('a') => Some(Action::CursorStart),
            KeyCode::Char('e') => Some(Action::CursorEnd),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Esc if kiosk.input().as_str().is_empty() => Some(Action::Quit),
        KeyCode::Esc => Some(Action::InputClear),
        KeyCode::Backspace => Some(Action::InputPop),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Home => Some(Action::CursorStart),
        KeyCode::End => Some(Action::CursorEnd),
        KeyCode::Char(c) => Some(Action::InputPush(c)),
        _ => None,
    }
}

fn resolve_profile_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Enter | KeyCode::Char('i' | 'I') => Some(Action::CheckIn),
        KeyCode::Char('o' | 'O') => Some(Action::CheckOut),
        KeyCode::Esc | KeyCode::Char('c' | 'C') => Some(Action::Reset),
        _ => None,
    }
}

fn resolve_terminal_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Enter | KeyCode::Esc => Some(Action::Reset),
        // Start typing the next identifier straight away
        KeyCode::Char(c) => Some(Action::InputPush(c)),
        _ => None,
    }
}
