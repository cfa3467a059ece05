use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    None,
    Quit,
    /// Recompute snapshots against the current date.
    Refresh,
    /// Fire the mark-collected notification action.
    MarkCollected,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{BackTab, Char, Left, Right, Tab};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    match key.code {
        Tab | Right => {
            app.next_screen();
            Action::None
        }
        BackTab | Left => {
            app.previous_screen();
            Action::None
        }
        Char('r') => Action::Refresh,
        Char('m') => Action::MarkCollected,
        _ => Action::None,
    }
}
