//! Status bar component.

use chrono::Utc;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::App;

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let path = format!(" {} ", app.page.route().path());

    let page_span = match app.page_id {
        Some(page) => Span::styled(format!(" {page} "), Style::default().fg(Color::Green)),
        None => Span::styled(" starting ", Style::default().fg(Color::Yellow)),
    };

    let notice_span = if let Some(ref notice) = app.notice {
        Span::styled(
            format!(" {} ", notice.message),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::raw("")
    };

    let clock = Utc::now().format(" %H:%M:%S UTC ").to_string();
    let used = path.len() + page_span.width() + notice_span.width() + 2;

    let line = Line::from(vec![
        Span::styled(path, Style::default().fg(Color::White)),
        Span::raw("│"),
        page_span,
        Span::raw("│"),
        notice_span,
        Span::raw(format!(
            "{:>width$}",
            clock,
            width = usize::from(area.width).saturating_sub(used)
        )),
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
