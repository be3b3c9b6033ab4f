use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use dm_base::constants::{SCROLL_ARROW_AMOUNT, SCROLL_PAGE_AMOUNT};

use super::actions::{Action, CredentialEdit};
use crate::state::State;

/// Map a terminal event to an action. `None` means quit.
pub fn handle_event(event: &Event, state: &State) -> Option<Action> {
    match event {
        Event::Key(key) => {
            // Windows reports releases too
            if key.kind == KeyEventKind::Release {
                return Some(Action::None);
            }

            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

            // Global shortcuts (always handled first)
            if ctrl {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('c') => return None,
                    KeyCode::Char('s') => return Some(Action::ToggleSettings),
                    _ => {}
                }
            }
            if key.code == KeyCode::F(2) {
                return Some(Action::ToggleSettings);
            }

            if state.show_settings {
                return Some(handle_settings_key(key));
            }

            let action = match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return None,
                KeyCode::Char('r') => Action::RereadSelection,
                KeyCode::Up | KeyCode::Char('k') => Action::ScrollUp(SCROLL_ARROW_AMOUNT),
                KeyCode::Down | KeyCode::Char('j') => Action::ScrollDown(SCROLL_ARROW_AMOUNT),
                KeyCode::PageUp => Action::ScrollUp(SCROLL_PAGE_AMOUNT),
                KeyCode::PageDown | KeyCode::Char(' ') => Action::ScrollDown(SCROLL_PAGE_AMOUNT),
                KeyCode::Home | KeyCode::Char('g') => Action::ScrollTop,
                _ => Action::None,
            };
            Some(action)
        }
        // Bracketed paste only matters for the key field
        Event::Paste(text) if state.show_settings => Some(Action::EditCredential(CredentialEdit::Paste(text.clone()))),
        _ => Some(Action::None),
    }
}

/// Keys while the settings form is open: everything printable goes into the field
fn handle_settings_key(key: &KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Action::ToggleSettings,
        KeyCode::Backspace => Action::EditCredential(CredentialEdit::Backspace),
        KeyCode::Char('u') if ctrl => Action::EditCredential(CredentialEdit::Clear),
        KeyCode::Char(c) if !ctrl => Action::EditCredential(CredentialEdit::Insert(c)),
        _ => Action::None,
    }
}
