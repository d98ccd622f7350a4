//! Header bar widget
//!
//! Shows the app name, the backend in use and the current project.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use sitegen_app::PreviewPhase;
use sitegen_core::ProjectId;

use crate::theme::{palette, styles};

/// Main header showing app title, backend URL, and the current project
pub struct MainHeader<'a> {
    backend: &'a str,
    project_id: Option<&'a ProjectId>,
    phase: &'a PreviewPhase,
}

impl<'a> MainHeader<'a> {
    pub fn new(backend: &'a str, phase: &'a PreviewPhase) -> Self {
        Self {
            backend,
            project_id: None,
            phase,
        }
    }

    pub fn with_project(mut self, project_id: Option<&'a ProjectId>) -> Self {
        self.project_id = project_id;
        self
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let (status_icon, _label, status_style) = styles::preview_indicator(self.phase);

        // Left section: status dot + "sitegen" + "/" + backend
        let left_line = Line::from(vec![
            Span::raw(" "),
            Span::styled(status_icon, status_style),
            Span::raw(" "),
            Span::styled(
                "sitegen",
                Style::default()
                    .fg(palette::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled("/", styles::text_muted()),
            Span::raw(" "),
            Span::styled(self.backend, styles::text_secondary()),
        ]);
        let left_width = left_line.width() as u16;
        buf.set_line(inner.x, inner.y, &left_line, inner.width);

        // Right-aligned project pill, only if it fits
        let Some(project_id) = self.project_id else {
            return;
        };
        let pill = Line::from(vec![
            Span::styled("project ", styles::text_muted()),
            Span::styled(project_id.as_str(), styles::accent()),
            Span::raw(" "),
        ]);
        let pill_width = pill.width() as u16;
        if left_width + pill_width + 2 <= inner.width {
            let x = inner.x + inner.width - pill_width;
            buf.set_line(x, inner.y, &pill, pill_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_header_renders_title_and_backend() {
        let mut term = TestTerminal::new();
        let phase = PreviewPhase::Idle;
        let header = MainHeader::new("http://localhost:8000/", &phase);

        term.render_widget(header, Rect::new(0, 0, 80, 3));

        assert!(term.buffer_contains("sitegen"));
        assert!(term.buffer_contains("http://localhost:8000/"));
    }

    #[test]
    fn test_header_renders_project_pill() {
        let mut term = TestTerminal::new();
        let phase = PreviewPhase::Polling;
        let id = ProjectId::new("p1");
        let header = MainHeader::new("http://localhost:8000/", &phase).with_project(Some(&id));

        term.render_widget(header, Rect::new(0, 0, 80, 3));

        assert!(term.line_contains(1, "project p1"));
    }

    #[test]
    fn test_header_drops_pill_when_narrow() {
        let mut term = TestTerminal::with_size(30, 3);
        let phase = PreviewPhase::Polling;
        let id = ProjectId::new("p1");
        let header = MainHeader::new("http://localhost:8000/", &phase).with_project(Some(&id));

        term.render_widget(header, Rect::new(0, 0, 30, 3));

        assert!(!term.buffer_contains("project"));
    }
}
