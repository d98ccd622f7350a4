//! Semantic style builders.

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};
use sitegen_app::PreviewPhase;

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Status styles ---
pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn status_yellow() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

// --- Keybinding hint style ---
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// "Black on Cyan" - used for the enabled download button
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

// --- Phase indicator mapping ---

/// Preview phase indicator for the header and preview panel.
///
/// Returns `(icon_char, label, Style)` for the given phase.
pub fn preview_indicator(phase: &PreviewPhase) -> (&'static str, &'static str, Style) {
    match phase {
        PreviewPhase::Idle => ("○", "Idle", text_muted()),
        PreviewPhase::TearingDown { .. } => (
            "↻",
            "Stopping previous",
            status_yellow().add_modifier(Modifier::BOLD),
        ),
        PreviewPhase::Polling => (
            "↻",
            "Building",
            status_yellow().add_modifier(Modifier::BOLD),
        ),
        PreviewPhase::Ready { .. } => (
            "●",
            "Live",
            Style::default()
                .fg(palette::STATUS_GREEN)
                .add_modifier(Modifier::BOLD),
        ),
        PreviewPhase::Errored { .. } => ("✗", "Failed", status_red()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_styles_have_correct_colors() {
        assert_eq!(text_primary().fg, Some(palette::TEXT_PRIMARY));
        assert_eq!(text_secondary().fg, Some(palette::TEXT_SECONDARY));
        assert_eq!(text_muted().fg, Some(palette::TEXT_MUTED));
    }

    #[test]
    fn test_focused_selected_uses_black_on_cyan() {
        let style = focused_selected();
        assert_eq!(style.fg, Some(palette::CONTRAST_FG));
        assert_eq!(style.bg, Some(palette::ACCENT));
    }

    #[test]
    fn test_preview_indicator_ready() {
        let phase = PreviewPhase::Ready {
            preview_url: "http://localhost:4000".into(),
            download_url: None,
        };
        let (icon, label, style) = preview_indicator(&phase);
        assert_eq!(icon, "●");
        assert_eq!(label, "Live");
        assert_eq!(style.fg, Some(palette::STATUS_GREEN));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_preview_indicator_errored() {
        let phase = PreviewPhase::Errored {
            message: "Failed to fetch preview status".into(),
        };
        let (icon, label, style) = preview_indicator(&phase);
        assert_eq!(icon, "✗");
        assert_eq!(label, "Failed");
        assert_eq!(style.fg, Some(palette::STATUS_RED));
    }

    #[test]
    fn test_preview_indicator_all_phases_covered() {
        for phase in [
            PreviewPhase::Idle,
            PreviewPhase::TearingDown {
                previous: "a".into(),
            },
            PreviewPhase::Polling,
            PreviewPhase::Errored {
                message: "x".into(),
            },
        ] {
            let (icon, label, _style) = preview_indicator(&phase);
            assert!(!icon.is_empty());
            assert!(!label.is_empty());
        }
    }
}
