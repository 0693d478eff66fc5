//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Screen currently shown below the control bar
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum View {
    #[default]
    Posts,
    Detail,
    PostForm,
    Login,
    Register,
}

impl View {
    pub fn is_form(&self) -> bool {
        matches!(self, View::PostForm | View::Login | View::Register)
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Control bar shortcut; resolved against the menu for the current user
    MenuKey(char),
    Back,

    // Lists
    SelectNext,
    SelectPrev,
    NextPage,
    PrevPage,
    Open,
    Refresh,
    /// Delete the selected post or comment
    Delete,
    /// Edit the selected post or comment
    Edit,
    /// Edit the post shown in the detail view
    EditPost,
    WriteComment,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    NextField,
    Submit,
    TogglePasswordVisibility,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    view: View,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return Some(UiEvent::Quit);
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Editing => editing_keys(key),
        InputMode::Normal => normal_keys(key, view),
    }
}

fn editing_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::StopEditing),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

fn normal_keys(key: KeyEvent, view: View) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => return Some(UiEvent::Quit),
        KeyCode::Char('?') => return Some(UiEvent::ToggleHelp),
        KeyCode::Esc => return Some(UiEvent::Back),
        KeyCode::Char(c @ ('1' | '2' | '3' | 'l' | 'r' | 'o')) => return Some(UiEvent::MenuKey(c)),
        _ => {}
    }

    match view {
        View::Posts => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
            KeyCode::Left | KeyCode::Char('h') => Some(UiEvent::PrevPage),
            KeyCode::Right => Some(UiEvent::NextPage),
            KeyCode::Enter => Some(UiEvent::Open),
            KeyCode::Char('g') => Some(UiEvent::Refresh),
            KeyCode::Char('d') => Some(UiEvent::Delete),
            KeyCode::Char('u') => Some(UiEvent::Edit),
            _ => None,
        },
        View::Detail => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
            KeyCode::Char('i') | KeyCode::Enter => Some(UiEvent::WriteComment),
            KeyCode::Char('u') => Some(UiEvent::Edit),
            KeyCode::Char('d') => Some(UiEvent::Delete),
            KeyCode::Char('p') => Some(UiEvent::EditPost),
            KeyCode::Char('g') => Some(UiEvent::Refresh),
            KeyCode::Char('b') => Some(UiEvent::Back),
            _ => None,
        },
        View::PostForm | View::Login | View::Register => match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => Some(UiEvent::NextField),
            KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
            KeyCode::Char('s') => Some(UiEvent::Submit),
            KeyCode::Char('v') if view != View::PostForm => Some(UiEvent::TogglePasswordVisibility),
            _ => None,
        },
    }
}
