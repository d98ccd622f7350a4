//! Download control, enabled only once the preview is ready.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{palette, styles};

pub struct DownloadButton<'a> {
    target: Option<&'a str>,
}

impl<'a> DownloadButton<'a> {
    /// `target` is the resolved download reference; `None` renders disabled.
    pub fn new(target: Option<&'a str>) -> Self {
        Self { target }
    }
}

impl Widget for DownloadButton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let enabled = self.target.is_some();
        let block = styles::glass_block(enabled)
            .title(" Download ")
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let line = match self.target {
            Some(url) => Line::from(vec![
                Span::styled(" ⬇ Download ZIP ", styles::focused_selected()),
                Span::raw("  "),
                Span::styled("Ctrl+D", styles::keybinding()),
                Span::raw("  "),
                Span::styled(url, styles::text_muted()),
            ]),
            None => Line::from(vec![
                Span::styled(" ⬇ Download ZIP ", styles::text_muted()),
                Span::raw("  "),
                Span::styled(
                    "available once the preview is ready",
                    styles::text_muted(),
                ),
            ]),
        };
        buf.set_line(inner.x, inner.y, &line, inner.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_disabled_download_explains_why() {
        let mut term = TestTerminal::new();
        term.render_widget(DownloadButton::new(None), Rect::new(0, 0, 80, 3));

        assert!(term.buffer_contains("available once the preview is ready"));
        assert!(!term.buffer_contains("Ctrl+D"));
    }

    #[test]
    fn test_enabled_download_shows_target() {
        let mut term = TestTerminal::new();
        let button = DownloadButton::new(Some("http://localhost:8000/api/download/p1"));
        term.render_widget(button, Rect::new(0, 0, 80, 3));

        assert!(term.buffer_contains("Ctrl+D"));
        assert!(term.buffer_contains("http://localhost:8000/api/download/p1"));
    }
}
