use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::TreeKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Action {
    Tree(TreeKey),
    Refresh,
    BrowsePath,
    ClearLog,
    Quit,
}

pub(super) fn action_for(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    let action = match key.code {
        KeyCode::Char('+') | KeyCode::Right | KeyCode::Char('l') => Action::Tree(TreeKey::Expand),
        KeyCode::Char('-') | KeyCode::Left | KeyCode::Char('h') => Action::Tree(TreeKey::Collapse),
        KeyCode::Up | KeyCode::Char('k') => Action::Tree(TreeKey::Up),
        KeyCode::Down | KeyCode::Char('j') => Action::Tree(TreeKey::Down),
        KeyCode::PageUp => Action::Tree(TreeKey::PageUp),
        KeyCode::PageDown => Action::Tree(TreeKey::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Action::Tree(TreeKey::Home),
        KeyCode::End | KeyCode::Char('G') => Action::Tree(TreeKey::End),
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('s') => Action::BrowsePath,
        KeyCode::Char('c') => Action::ClearLog,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}
