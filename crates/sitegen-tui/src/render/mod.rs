//! Main render/view function (View in TEA pattern)


use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use sitegen_app::AppState;

use crate::layout;
use crate::theme::palette;
use crate::widgets;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner frame for the given animation tick (two ticks per frame).
pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER[((tick / 2) % SPINNER.len() as u64) as usize]
}

/// Render the complete UI (View function in TEA)
///
/// Pure rendering: reads `state`, never mutates it.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);
    let spinner = spinner_frame(state.tick);

    let header = widgets::MainHeader::new(&state.settings.api.base_url, state.preview.phase())
        .with_project(state.project_id.as_ref());
    frame.render_widget(header, areas.header);

    let prompt = widgets::PromptInput::new(&state.input).spinner(spinner);
    let cursor = prompt.cursor_position(areas.prompt);
    frame.render_widget(prompt, areas.prompt);
    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }

    frame.render_widget(
        widgets::PreviewPanel::new(&state.preview).spinner(spinner),
        areas.preview,
    );
    frame.render_widget(
        widgets::DownloadButton::new(state.download_target()),
        areas.download,
    );
    frame.render_widget(
        widgets::StatusBar::new(state.error.as_deref()),
        areas.status,
    );
}
