//! Candlestick chart panel.
//!
//! Paints the live [`ChartInstance`] of a [`ChartPanel`]: a selector row on
//! top, the price axis and plot in the middle with the volume histogram at
//! its foot, and the crosshair readout at the bottom.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use rust_decimal::Decimal;

use super::{border_style, dim_style, selected_style};
use crate::chart::ChartInstance;
use crate::controller::{ChartPanel, TIMEFRAMES};
use crate::render::{ChartReadout, fixed, format_volume};

/// Columns taken by the price axis left of the plot.
pub const AXIS_WIDTH: u16 = 11;

/// Plot rectangle inside a chart panel drawn at `area`.
///
/// Mouse handling and the painter must agree on this, so both go through
/// here.
pub fn plot_area(area: Rect) -> Rect {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    Rect {
        x: inner.x + AXIS_WIDTH.min(inner.width),
        y: inner.y + inner.height.min(1),
        width: inner.width.saturating_sub(AXIS_WIDTH),
        height: inner.height.saturating_sub(2),
    }
}

/// Timeframe selector spans with the active one highlighted.
pub fn timeframe_spans(days: u32) -> Vec<Span<'static>> {
    TIMEFRAMES
        .iter()
        .map(|(label, d)| {
            let style = if *d == days {
                selected_style()
            } else {
                Style::default()
            };
            Span::styled(format!(" {label} "), style)
        })
        .collect()
}

/// Renders the chart panel.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    panel: &ChartPanel,
    title: &str,
    selectors: Line<'_>,
    focused: bool,
) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 3 || inner.width <= AXIS_WIDTH {
        return;
    }

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(inner);

    frame.render_widget(Paragraph::new(selectors), rows[0]);
    frame.render_widget(Paragraph::new(readout_line(&panel.readout())), rows[2]);

    let lines = match panel.adapter().instance() {
        Some(instance) if instance.visible_range().is_some() => {
            let columns = rows[1].width.saturating_sub(AXIS_WIDTH);
            plot_lines(instance, columns)
        }
        Some(_) => vec![placeholder("No chart data")],
        None => vec![placeholder("Loading chart...")],
    };
    frame.render_widget(Paragraph::new(lines), rows[1]);
}

fn placeholder(text: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw(" ".repeat(usize::from(AXIS_WIDTH))),
        Span::styled(text, dim_style()),
    ])
}

fn readout_line(readout: &ChartReadout) -> Line<'static> {
    let cell = |name: &'static str, value: &str| {
        [
            Span::styled(format!(" {name} "), dim_style()),
            Span::raw(value.to_string()),
        ]
    };
    Line::from(
        [
            cell("O", &readout.open.text),
            cell("H", &readout.high.text),
            cell("L", &readout.low.text),
            cell("C", &readout.close.text),
            cell("V", &readout.volume.text),
        ]
        .concat(),
    )
}

/// Draws candles and volume bars, one plot column per terminal cell.
fn plot_lines(instance: &ChartInstance, max_columns: u16) -> Vec<Line<'static>> {
    let Some(range) = instance.visible_range() else {
        return Vec::new();
    };
    let columns = instance.container().width.min(max_columns);
    let price_rows = instance.price_rows();
    let volume_rows = instance.volume_rows();
    let step = (range.price_high - range.price_low) / Decimal::from(price_rows.max(1));

    let axis_style = dim_style();
    let mut lines = Vec::with_capacity(usize::from(price_rows + volume_rows));

    for row in 0..price_rows {
        let top = range.price_high - step * Decimal::from(row);
        let bottom = top - step;

        let mut spans = vec![Span::styled(
            format!("{:>9} │", fixed(top, 2)),
            axis_style,
        )];
        for column in 0..columns {
            let Some(index) = instance.bar_at(column) else {
                spans.push(Span::raw(" "));
                continue;
            };
            let candle = &instance.candles()[index];
            let body_top = candle.open.max(candle.close);
            let body_bottom = candle.open.min(candle.close);

            let glyph = if body_top >= bottom && body_bottom <= top {
                "█"
            } else if candle.high >= bottom && candle.low <= top {
                "│"
            } else {
                " "
            };

            let color = if candle.close >= candle.open {
                Color::Green
            } else {
                Color::Red
            };
            let mut style = Style::default().fg(color);
            if instance.hovered() == Some(index) {
                style = style.bg(Color::DarkGray);
            }
            spans.push(Span::styled(glyph, style));
        }
        lines.push(Line::from(spans));
    }

    for row in 0..volume_rows {
        // Rows count down to 1 at the baseline.
        let level = u128::from(volume_rows - row);
        let label = if row == 0 {
            format_volume(Decimal::from(range.volume_high))
        } else {
            String::new()
        };

        let mut spans = vec![Span::styled(format!("{label:>9} │"), axis_style)];
        for column in 0..columns {
            let Some(bar) = instance.bar_at(column).and_then(|i| instance.volumes().get(i)) else {
                spans.push(Span::raw(" "));
                continue;
            };
            let filled = bar.value > 0
                && u128::from(bar.value) * u128::from(volume_rows)
                    >= u128::from(range.volume_high) * level;
            let color = if bar.rising { Color::Green } else { Color::Red };
            let style = Style::default().fg(color).add_modifier(Modifier::DIM);
            spans.push(Span::styled(if filled { "▆" } else { " " }, style));
        }
        lines.push(Line::from(spans));
    }

    lines
}
