//! Abstract input key event, independent of terminal library.
//!
//! The TUI converts crossterm key events into [`InputKey`] at its boundary so
//! the application layer (and the headless runner) never depend on crossterm.

/// Abstract input key event, converted from `crossterm::event::KeyEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key
    Char(char),
    /// Character with Ctrl modifier (Ctrl+d, Ctrl+c, etc.)
    CharCtrl(char),

    Left,
    Right,
    Home,
    End,

    Enter,
    Esc,
    Backspace,
    Delete,
}
