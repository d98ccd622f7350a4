//! Key event handlers

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::AppState;

/// Convert key events to messages
///
/// The prompt always has focus; global actions live on Ctrl chords so every
/// printable character reaches the draft.
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('c' | 'q') => Some(Message::Quit),
        InputKey::CharCtrl('d') => Some(Message::TriggerDownload),
        InputKey::CharCtrl('o') => Some(Message::OpenPreview),
        InputKey::CharCtrl('u') => Some(Message::InputClear),

        // Esc dismisses the error banner first, quits otherwise
        InputKey::Esc if state.error.is_some() => Some(Message::DismissError),
        InputKey::Esc => Some(Message::Quit),

        InputKey::Enter => Some(Message::SubmitGeneration),
        InputKey::Char(c) => Some(Message::InputChar(c)),
        InputKey::Backspace => Some(Message::InputBackspace),
        InputKey::Delete => Some(Message::InputDelete),
        InputKey::Left => Some(Message::InputCursorLeft),
        InputKey::Right => Some(Message::InputCursorRight),
        InputKey::Home => Some(Message::InputCursorHome),
        InputKey::End => Some(Message::InputCursorEnd),

        _ => None,
    }
}
