use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    Top,
    Bottom,
    Select,
    Refresh,
    Help,
    ClosePopup,
    Quit,
    None,
}

pub fn map_key(key: KeyEvent, popup_open: bool) -> Action {
    if popup_open {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') => Action::ClosePopup,
            KeyCode::Char('q') => Action::ClosePopup,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
        KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
        KeyCode::Char('g') | KeyCode::Home => Action::Top,
        KeyCode::Char('G') | KeyCode::End => Action::Bottom,
        KeyCode::Enter => Action::Select,
        KeyCode::Char('r') | KeyCode::F(5) => Action::Refresh,
        KeyCode::Char('?') => Action::Help,
        _ => Action::None,
    }
}
