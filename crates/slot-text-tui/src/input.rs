use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePause,
    Restart,
    /// Switch to the next easing curve
    CycleEasing,
    /// Flip between forward and reverse playback
    ToggleDirection,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::TogglePause,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::TogglePause,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Restart,
        (KeyCode::Char('e'), KeyModifiers::NONE) => Action::CycleEasing,
        (KeyCode::Char('d'), KeyModifiers::NONE) => Action::ToggleDirection,

        _ => Action::None,
    }
}
