//! Preview status panel
//!
//! Renders the preview component's phase: idle hint, build progress with a
//! spinner, the live preview URL, or the error that stopped polling.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use sitegen_app::preview::PreviewState;
use sitegen_app::PreviewPhase;

use crate::theme::{palette, styles};

pub struct PreviewPanel<'a> {
    preview: &'a PreviewState,
    spinner: &'static str,
}

impl<'a> PreviewPanel<'a> {
    pub fn new(preview: &'a PreviewState) -> Self {
        Self {
            preview,
            spinner: "",
        }
    }

    pub fn spinner(mut self, frame: &'static str) -> Self {
        self.spinner = frame;
        self
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let project = self
            .preview
            .project_id()
            .map(|id| id.as_str())
            .unwrap_or_default();

        match self.preview.phase() {
            PreviewPhase::Idle => vec![Line::from(Span::styled(
                "Describe a website above and press Enter to generate it.",
                styles::text_muted(),
            ))],
            PreviewPhase::TearingDown { previous } => vec![Line::from(vec![
                Span::styled(self.spinner, styles::status_yellow()),
                Span::raw(" "),
                Span::styled(
                    format!("Stopping the preview of {}…", previous),
                    styles::text_secondary(),
                ),
            ])],
            PreviewPhase::Polling => vec![
                Line::from(vec![
                    Span::styled(self.spinner, styles::status_yellow()),
                    Span::raw(" "),
                    Span::styled(
                        format!("Building preview for {}…", project),
                        styles::text_secondary(),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("status checks: {}", self.preview.queries_issued()),
                    styles::text_muted(),
                )),
            ],
            PreviewPhase::Ready { preview_url, .. } => vec![
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(palette::STATUS_GREEN)),
                    Span::styled(format!("Preview of {} is live", project), styles::text_primary()),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("URL  ", styles::text_muted()),
                    Span::styled(preview_url.as_str(), styles::accent()),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Ctrl+O", styles::keybinding()),
                    Span::styled(" opens it in your browser", styles::text_muted()),
                ]),
            ],
            PreviewPhase::Errored { message } => vec![Line::from(Span::styled(
                format!("✗ {}", message),
                styles::status_red(),
            ))],
        }
    }
}

impl Widget for PreviewPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (icon, label, style) = styles::preview_indicator(self.preview.phase());
        let title = Line::from(vec![
            Span::raw(" Preview "),
            Span::styled(format!("{} {} ", icon, label), style),
        ]);

        let block = styles::glass_block(self.preview.is_ready())
            .title(title)
            .style(Style::default().bg(palette::CARD_BG));

        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
