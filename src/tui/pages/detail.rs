//! Commodity detail page layout and rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::controller::DetailController;
use crate::render::RELATED_NEWS_TITLE;
use crate::tui::app::{App, Focus};
use crate::tui::components::{
    border_style, candles, dim_style, nav_bar, selected_style, stats, status_bar, tone_style,
    truncate,
};
use crate::tui::ui::DetailLayout;

/// Renders a commodity detail page.
pub fn render(frame: &mut Frame, app: &App, page: &DetailController) {
    let layout = DetailLayout::new(frame.area());

    nav_bar::render(frame, layout.nav, app);
    status_bar::render(frame, layout.status, app);
    render_breadcrumb(frame, layout.breadcrumb, page);
    render_header(frame, layout.header, page);

    let chart = page.chart();
    candles::render(
        frame,
        layout.chart,
        chart,
        page.chart_title().unwrap_or("Price Chart"),
        Line::from(candles::timeframe_spans(page.days())),
        app.focus == Focus::Chart,
    );
    stats::render(frame, layout.stats, "Chart Stats", chart.stats(), false);

    render_news(frame, layout.news, app, page);
    render_related(frame, layout.related, app, page);
    render_keybindings(frame, layout.help);
}

fn render_breadcrumb(frame: &mut Frame, area: Rect, page: &DetailController) {
    let current = page
        .header()
        .map_or_else(|| page.symbol().to_string(), |h| h.breadcrumb.text.clone());

    let line = Line::from(vec![
        Span::styled(" Home", dim_style()),
        Span::styled(" › ", dim_style()),
        Span::styled(current, Style::default().fg(Color::White)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Renders the live price header, with the canonical link at its foot.
fn render_header(frame: &mut Frame, area: Rect, page: &DetailController) {
    let mut block = Block::default().borders(Borders::ALL).border_style(dim_style());
    if let Some(canonical) = page.canonical() {
        block = block.title_bottom(
            Line::from(Span::styled(format!(" {canonical} "), dim_style())).right_aligned(),
        );
    }

    let Some(header) = page.header() else {
        let para = Paragraph::new(Span::styled(
            format!("Loading {}...", page.symbol()),
            dim_style(),
        ))
        .block(block);
        frame.render_widget(para, area);
        return;
    };

    let mut stat_spans = Vec::with_capacity(header.stats.len() * 3);
    for (i, item) in header.stats.iter().enumerate() {
        if i > 0 {
            stat_spans.push(Span::styled(" │ ", dim_style()));
        }
        stat_spans.push(Span::styled(format!("{} ", item.label), dim_style()));
        stat_spans.push(Span::styled(item.value.text.clone(), tone_style(item.value.tone)));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", header.symbol.text),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(header.name.text.clone()),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{} ", header.price.text),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(header.change.text.clone(), tone_style(header.change.tone)),
        ]),
        Line::from(stat_spans),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_news(frame: &mut Frame, area: Rect, app: &App, page: &DetailController) {
    let focused = app.focus == Focus::News;
    let block = Block::default()
        .title(format!(" {RELATED_NEWS_TITLE} "))
        .borders(Borders::ALL)
        .border_style(border_style(focused));

    let cards = page.news();
    let inner_width = usize::from(area.width.saturating_sub(2));
    let lines: Vec<Line> = if cards.is_empty() {
        vec![Line::from(Span::styled("No news yet", dim_style()))]
    } else {
        cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                let style = if focused && app.selection == i {
                    selected_style()
                } else {
                    Style::default()
                };
                let source = format!(" · {}", card.source);
                let room = inner_width.saturating_sub(9 + source.chars().count());
                Line::from(vec![
                    Span::styled(format!("{:>8} ", card.age), dim_style()),
                    Span::styled(truncate(&card.title, room), style),
                    Span::styled(source, dim_style()),
                ])
            })
            .collect()
    };

    let visible = usize::from(area.height.saturating_sub(2)).max(1);
    let scroll = if focused {
        (app.selection + 1).saturating_sub(visible)
    } else {
        0
    };
    let para = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(para, area);
}

fn render_related(frame: &mut Frame, area: Rect, app: &App, page: &DetailController) {
    let focused = app.focus == Focus::Related;
    let block = Block::default()
        .title(" Other Commodities ")
        .borders(Borders::ALL)
        .border_style(border_style(focused));

    let lines: Vec<Line> = page
        .related()
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let symbol_style = if focused && app.selection == i {
                selected_style()
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            Line::from(vec![
                Span::styled(format!("{:<8}", card.symbol), symbol_style),
                Span::styled(format!("{:<20} ", truncate(&card.name, 20)), dim_style()),
                Span::raw(format!("{:>10} ", card.price)),
                Span::styled(card.change.text.clone(), tone_style(card.change.tone)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_keybindings(frame: &mut Frame, area: Rect) {
    let help = "[Tab]focus [↑↓]select [Enter]open [1-5]timeframe [←→]crosshair [h]ome [q]quit";

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
