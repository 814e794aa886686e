//! "label: value" panel.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{border_style, dim_style, tone_style};
use crate::render::StatItem;

/// Renders `items` one per line, or a placeholder while there are none.
pub fn render(frame: &mut Frame, area: Rect, title: &str, items: &[StatItem], focused: bool) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_style(focused));

    let lines: Vec<Line> = if items.is_empty() {
        vec![Line::from(Span::styled("--", dim_style()))]
    } else {
        let label_width = items.iter().map(|i| i.label.len()).max().unwrap_or(0);
        items
            .iter()
            .map(|item| {
                Line::from(vec![
                    Span::styled(format!("{:<label_width$}  ", item.label), dim_style()),
                    Span::styled(item.value.text.clone(), tone_style(item.value.tone)),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
