//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Prompt box height: border + input row + hint/error row + border
pub const PROMPT_HEIGHT: u16 = 4;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title bar (app name, backend, current project)
    pub header: Rect,

    /// Description input
    pub prompt: Rect,

    /// Preview status panel
    pub preview: Rect,

    /// Download control
    pub download: Rect,

    /// Single-line key hints / top-level error
    pub status: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(PROMPT_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        prompt: chunks[1],
        preview: chunks[2],
        download: chunks[3],
        status: chunks[4],
    }
}
