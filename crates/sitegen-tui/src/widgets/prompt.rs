//! Description input box

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use sitegen_app::input::InputState;

use crate::theme::{palette, styles};

const PROMPT_MARKER: &str = "> ";
const PLACEHOLDER: &str = "Describe the website you want, e.g. a blog site";

/// Single-line description input with an inline error/hint row.
pub struct PromptInput<'a> {
    input: &'a InputState,
    spinner: &'static str,
}

impl<'a> PromptInput<'a> {
    pub fn new(input: &'a InputState) -> Self {
        Self { input, spinner: "" }
    }

    /// Spinner frame shown while a submission is in flight
    pub fn spinner(mut self, frame: &'static str) -> Self {
        self.spinner = frame;
        self
    }

    /// Terminal cursor position for `area`, or `None` while submitting.
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        if self.input.is_submitting() || area.width < 3 || area.height < 3 {
            return None;
        }
        let before_cursor: String = self.input.draft().chars().take(self.input.cursor()).collect();
        let offset = (PROMPT_MARKER.width() + before_cursor.width()) as u16;
        let max_x = area.x + area.width - 2;
        Some(Position::new((area.x + 1 + offset).min(max_x), area.y + 1))
    }
}

impl Widget for PromptInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let submitting = self.input.is_submitting();
        let title = if submitting {
            Line::from(vec![
                Span::raw(" Description "),
                Span::styled(format!("{} Generating… ", self.spinner), styles::status_yellow()),
            ])
        } else {
            Line::from(" Description ")
        };

        let block = styles::glass_block(!submitting)
            .title(title)
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let draft = self.input.draft();
        let input_line = if draft.is_empty() {
            Line::from(vec![
                Span::styled(PROMPT_MARKER, styles::accent()),
                Span::styled(PLACEHOLDER, styles::text_muted()),
            ])
        } else {
            Line::from(vec![
                Span::styled(PROMPT_MARKER, styles::accent()),
                Span::styled(draft, styles::text_primary()),
            ])
        };
        buf.set_line(inner.x, inner.y, &input_line, inner.width);

        if inner.height < 2 {
            return;
        }
        let detail = match self.input.error() {
            Some(error) => Line::from(Span::styled(format!("✗ {}", error), styles::status_red())),
            None if submitting => Line::from(Span::styled(
                "Waiting for the backend…",
                styles::text_muted(),
            )),
            None => Line::from(vec![
                Span::styled("Enter", styles::keybinding()),
                Span::styled(" to generate", styles::text_muted()),
            ]),
        };
        buf.set_line(inner.x, inner.y + 1, &detail, inner.width);
    }
}
