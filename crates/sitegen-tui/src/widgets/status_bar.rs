//! Bottom status bar: key hints, or the top-level error when one is raised.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::styles;

pub struct StatusBar<'a> {
    error: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(error: Option<&'a str>) -> Self {
        Self { error }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let line = match self.error {
            Some(error) => Line::from(vec![
                Span::styled(format!(" ✗ {}", error), styles::status_red()),
                Span::styled("  (Esc to dismiss)", styles::text_muted()),
            ]),
            None => {
                let mut spans = vec![Span::raw(" ")];
                for (i, (key, label)) in [
                    ("Enter", "generate"),
                    ("Ctrl+O", "open preview"),
                    ("Ctrl+D", "download"),
                    ("Esc", "quit"),
                ]
                .into_iter()
                .enumerate()
                {
                    if i > 0 {
                        spans.push(Span::styled(" · ", styles::text_muted()));
                    }
                    spans.push(Span::styled(key, styles::keybinding()));
                    spans.push(Span::styled(format!(" {}", label), styles::text_muted()));
                }
                Line::from(spans)
            }
        };
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_status_bar_shows_key_hints() {
        let mut term = TestTerminal::new();
        term.render_widget(StatusBar::new(None), Rect::new(0, 0, 80, 1));

        assert!(term.line_contains(0, "Enter generate"));
        assert!(term.line_contains(0, "Ctrl+D download"));
    }

    #[test]
    fn test_status_bar_shows_error_instead_of_hints() {
        let mut term = TestTerminal::new();
        let bar = StatusBar::new(Some("Failed to open browser: xdg-open"));
        term.render_widget(bar, Rect::new(0, 0, 80, 1));

        assert!(term.line_contains(0, "✗ Failed to open browser: xdg-open"));
        assert!(!term.line_contains(0, "Enter generate"));
    }
}
