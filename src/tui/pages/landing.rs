//! Landing page layout and rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::controller::LandingController;
use crate::render::{NewsCard, NewsGrid, PriceCard, TOP_CARD_SYMBOLS};
use crate::tui::app::{App, Focus};
use crate::tui::components::{
    border_style, candles, dim_style, nav_bar, selected_style, stats, status_bar, tone_style,
    truncate,
};
use crate::tui::ui::LandingLayout;

/// Renders the landing page.
pub fn render(frame: &mut Frame, app: &App, page: &LandingController) {
    let layout = LandingLayout::new(frame.area());

    nav_bar::render(frame, layout.nav, app);
    status_bar::render(frame, layout.status, app);
    render_ticker(frame, layout.ticker, app, page);
    render_cards(frame, layout.cards, app, page);

    let chart = page.chart();
    candles::render(
        frame,
        layout.chart,
        chart,
        &format!("{} Chart", page.symbol()),
        chart_selectors(page),
        app.focus == Focus::Chart,
    );
    stats::render(frame, layout.stats, "Chart Stats", chart.stats(), false);

    render_market(frame, layout.market, app, page);
    render_news(frame, layout.news, app, page);
    render_keybindings(frame, layout.help);
}

/// Symbol and timeframe selectors above the chart.
fn chart_selectors(page: &LandingController) -> Line<'static> {
    let mut spans: Vec<Span> = TOP_CARD_SYMBOLS
        .iter()
        .map(|symbol| {
            let style = if *symbol == page.symbol() {
                selected_style()
            } else {
                Style::default()
            };
            Span::styled(format!(" {symbol} "), style)
        })
        .collect();
    spans.push(Span::styled(" │ ", dim_style()));
    spans.extend(candles::timeframe_spans(page.days()));
    Line::from(spans)
}

/// Renders the scrolling ticker strip.
///
/// The strip rotates with the tick counter, and stops at the selection while
/// focused.
fn render_ticker(frame: &mut Frame, area: Rect, app: &App, page: &LandingController) {
    let items = page.ticker();
    let bar_style = Style::default().bg(Color::DarkGray);

    if items.is_empty() {
        let para = Paragraph::new(Span::styled(" Loading prices...", dim_style())).style(bar_style);
        frame.render_widget(para, area);
        return;
    }

    let focused = app.focus == Focus::Ticker;
    let start = if focused {
        app.selection
    } else {
        (app.ticks / 2) as usize % items.len()
    };

    let mut spans = Vec::with_capacity(items.len() * 4);
    for (i, item) in items.iter().enumerate().cycle().skip(start).take(items.len()) {
        let symbol_style = if focused && i == app.selection {
            selected_style()
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        spans.push(Span::styled(format!(" {} ", item.symbol), symbol_style));
        spans.push(Span::raw(item.price.clone()));
        spans.push(Span::styled(
            format!(" {} ", item.change.text),
            tone_style(item.change.tone),
        ));
        spans.push(Span::raw("│"));
    }

    let para = Paragraph::new(Line::from(spans)).style(bar_style);
    frame.render_widget(para, area);
}

/// Renders the top price cards side by side.
fn render_cards(frame: &mut Frame, area: Rect, app: &App, page: &LandingController) {
    let cards = page.grid().cards();
    if cards.is_empty() {
        let block = Block::default()
            .title(" Prices ")
            .borders(Borders::ALL)
            .border_style(border_style(app.focus == Focus::Cards));
        let para = Paragraph::new(Span::styled("Loading prices...", dim_style())).block(block);
        frame.render_widget(para, area);
        return;
    }

    let columns = Layout::horizontal(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);

    for (i, (card, column)) in cards.iter().zip(columns.iter()).enumerate() {
        let selected = app.focus == Focus::Cards && app.selection == i;
        render_card(frame, *column, card, selected);
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &PriceCard, selected: bool) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", card.symbol),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_top(
            Line::from(Span::styled(
                format!("{} ", card.badge.text),
                tone_style(card.badge.tone),
            ))
            .right_aligned(),
        )
        .borders(Borders::ALL)
        .border_style(border_style(selected));

    let inner_width = usize::from(area.width.saturating_sub(2));
    let lines = vec![
        Line::from(Span::styled(truncate(&card.name, inner_width), dim_style())),
        Line::from(Span::styled(
            card.price.text.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(card.change.text.clone(), tone_style(card.change.tone))),
        Line::from(vec![
            Span::styled("H ", dim_style()),
            Span::raw(card.high.text.clone()),
            Span::styled("  L ", dim_style()),
            Span::raw(card.low.text.clone()),
            Span::styled("  Vol ", dim_style()),
            Span::raw(card.volume.text.clone()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the full market table.
fn render_market(frame: &mut Frame, area: Rect, app: &App, page: &LandingController) {
    let focused = app.focus == Focus::Market;
    let block = Block::default()
        .title(" Markets ")
        .borders(Borders::ALL)
        .border_style(border_style(focused));

    let header = Row::new(["", "Commodity", "Price", "Change", "Change %", "High", "Low", "Volume"])
        .style(Style::default().fg(Color::Yellow));

    // Border and header take three rows.
    let visible = usize::from(area.height.saturating_sub(3)).max(1);
    let offset = if focused {
        (app.selection + 1).saturating_sub(visible)
    } else {
        0
    };

    let rows: Vec<Row> = page
        .table()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, row)| {
            let style = if focused && i == app.selection {
                selected_style()
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(Span::styled(row.icon.clone(), dim_style())),
                Cell::from(row.name.clone()),
                Cell::from(row.price.clone()),
                Cell::from(Span::styled(row.change.text.clone(), tone_style(row.change.tone))),
                Cell::from(Span::styled(
                    row.change_pct.text.clone(),
                    tone_style(row.change_pct.tone),
                )),
                Cell::from(row.high.clone()),
                Cell::from(row.low.clone()),
                Cell::from(row.volume.clone()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(12),
        Constraint::Length(10),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

/// Renders the filtered news: featured article on top, the rest below.
fn render_news(frame: &mut Frame, area: Rect, app: &App, page: &LandingController) {
    let focused = app.focus == Focus::News;
    let block = Block::default()
        .title(format!(" News [{}] ", page.category()))
        .borders(Borders::ALL)
        .border_style(border_style(focused));

    let Some(section) = page.news() else {
        let para = Paragraph::new(Span::styled("Loading news...", dim_style())).block(block);
        frame.render_widget(para, area);
        return;
    };

    let selected = |i: usize| focused && app.selection == i;
    let inner_width = usize::from(area.width.saturating_sub(2));
    let mut lines: Vec<Line> = Vec::new();

    if let Some(featured) = &section.featured {
        let title_style = if selected(0) {
            selected_style()
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(
            truncate(&featured.title, inner_width),
            title_style,
        )));
        lines.push(meta_line(featured));
        lines.push(Line::from(Span::styled(
            truncate(&featured.summary, inner_width),
            dim_style(),
        )));
        lines.push(Line::default());
    }

    // The selected line must stay in view; featured takes four lines.
    let mut selected_line = 0;
    match &section.grid {
        NewsGrid::Cards(cards) => {
            for (i, card) in cards.iter().enumerate() {
                let style = if selected(i + 1) {
                    selected_line = lines.len();
                    selected_style()
                } else {
                    Style::default()
                };
                let source = format!(" · {}", card.source);
                let room = inner_width.saturating_sub(9 + source.chars().count());
                lines.push(Line::from(vec![
                    Span::styled(format!("{:>8} ", card.age), dim_style()),
                    Span::styled(truncate(&card.title, room), style),
                    Span::styled(source, dim_style()),
                ]));
            }
        }
        NewsGrid::Empty(message) => {
            lines.push(Line::from(Span::styled(*message, dim_style())));
        }
    }

    let visible = usize::from(area.height.saturating_sub(2)).max(1);
    let scroll = (selected_line + 1).saturating_sub(visible);
    let para = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(para, area);
}

fn meta_line(card: &NewsCard) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {} ", card.category),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        Span::styled(
            format!(" {} · {} · {}", card.source, card.age, card.read_time),
            dim_style(),
        ),
    ])
}

fn render_keybindings(frame: &mut Frame, area: Rect) {
    let help = "[Tab]focus [↑↓]select [Enter]open [s]ymbol [1-5]timeframe [c/C]category [←→]crosshair [q]quit";

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
