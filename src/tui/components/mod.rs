//! Reusable widgets shared by the pages.

pub mod candles;
pub mod nav_bar;
pub mod stats;
pub mod status_bar;

use ratatui::style::{Color, Modifier, Style};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::render::Tone;

/// Foreground colour of a toned value.
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => Color::Green,
        Tone::Negative => Color::Red,
        Tone::Neutral => Color::White,
    }
}

pub fn tone_style(tone: Tone) -> Style {
    Style::default().fg(tone_color(tone))
}

/// Border of a panel, highlighted while it has focus.
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Style of the selected item or active option.
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn dim_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Cuts `text` to at most `width` display columns, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("OPEC", 10), "OPEC");
        assert_eq!(truncate("OPEC", 4), "OPEC");
    }

    #[test]
    fn truncate_counts_display_columns() {
        assert_eq!(truncate("Refinery margins", 8), "Refiner…");
        assert_eq!(truncate("原油価格", 5), "原油…");
        assert_eq!(truncate("anything", 0), "");
    }
}
