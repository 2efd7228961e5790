//! Key event handlers for different UI modes

use crate::form::WidgetInput;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::Form => handle_key_form(key),
        UiMode::Editing => handle_key_editing(state, key),
        UiMode::ConfirmQuit => handle_key_confirm_quit(key),
    }
}

fn handle_key_confirm_quit(key: InputKey) -> Option<Message> {
    match key {
        // 'q' allows double-tap "qq" as quick quit
        InputKey::Char('y' | 'Y' | 'q') | InputKey::Enter => Some(Message::ConfirmQuit),
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(Message::CancelQuit),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

fn handle_key_form(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::RequestQuit),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::CharCtrl('s') => Some(Message::Submit),

        InputKey::Down | InputKey::Char('j') | InputKey::Tab => Some(Message::FormNext),
        InputKey::Up | InputKey::Char('k') | InputKey::BackTab => Some(Message::FormPrev),
        InputKey::Home | InputKey::Char('g') => Some(Message::FormFirst),
        InputKey::End | InputKey::Char('G') => Some(Message::FormLast),
        InputKey::PageDown | InputKey::Char(']') => Some(Message::FormNextPanel),
        InputKey::PageUp | InputKey::Char('[') => Some(Message::FormPrevPanel),

        InputKey::Enter | InputKey::Char(' ') | InputKey::Right | InputKey::Char('l') => {
            Some(Message::FormActivate)
        }
        InputKey::Left | InputKey::Char('h') => Some(Message::FormCollapse),

        _ => None,
    }
}

fn handle_key_editing(state: &AppState, key: InputKey) -> Option<Message> {
    let submits_on_enter = state
        .view
        .editor
        .as_ref()
        .is_some_and(|e| e.widget.submits_on_enter());

    match key {
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::CharCtrl('s') => Some(Message::Submit),
        InputKey::Esc | InputKey::Tab => Some(Message::EditEnd),

        InputKey::Enter if submits_on_enter => Some(Message::EditEnd),
        InputKey::Enter => Some(Message::EditInput(WidgetInput::Enter)),

        InputKey::CharCtrl('r') => Some(Message::EditInput(WidgetInput::Reveal)),
        InputKey::CharCtrl('u') | InputKey::Delete => Some(Message::EditInput(WidgetInput::Clear)),
        InputKey::Backspace => Some(Message::EditInput(WidgetInput::Backspace)),
        InputKey::Up => Some(Message::EditInput(WidgetInput::Up)),
        InputKey::Down => Some(Message::EditInput(WidgetInput::Down)),
        InputKey::Char(c) => Some(Message::EditInput(WidgetInput::Char(c))),

        _ => None,
    }
}
