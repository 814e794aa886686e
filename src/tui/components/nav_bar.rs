//! Navigation bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::selected_style;
use crate::routes::Route;
use crate::tui::app::App;

/// Renders the navigation bar: brand, home, and the open commodity.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let route = app.page.route();

    let mut spans = vec![
        Span::styled(
            " oilwatch ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    let tab_style = |active: bool| {
        if active {
            selected_style()
        } else {
            Style::default().fg(Color::White)
        }
    };

    spans.push(Span::styled(" Markets ", tab_style(route == Route::Landing)));
    spans.push(Span::raw(" "));

    if let Route::Commodity(symbol) = &route {
        spans.push(Span::styled(format!(" {symbol} "), tab_style(true)));
        spans.push(Span::raw(" "));
    }

    let para = Paragraph::new(Line::from(spans));
    frame.render_widget(para, area);
}
