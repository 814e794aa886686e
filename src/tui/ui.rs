//! Main UI rendering coordinator and page layouts.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use super::app::App;
use super::components::candles;
use super::pages::{detail, landing};
use crate::controller::Page;
use crate::routes::Route;

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    match &app.page {
        Page::Landing(page) => landing::render(frame, app, page),
        Page::Detail(page) => detail::render(frame, app, page),
    }
}

/// Plot rectangle of the chart on the page for `route`.
pub fn chart_plot(route: &Route, area: Rect) -> Rect {
    let chart = match route {
        Route::Landing => LandingLayout::new(area).chart,
        Route::Commodity(_) => DetailLayout::new(area).chart,
    };
    candles::plot_area(chart)
}

/// Areas of the landing page.
#[derive(Debug, Clone, Copy)]
pub struct LandingLayout {
    pub nav: Rect,
    pub status: Rect,
    pub ticker: Rect,
    pub cards: Rect,
    pub chart: Rect,
    pub stats: Rect,
    pub market: Rect,
    pub news: Rect,
    pub help: Rect,
}

impl LandingLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // Nav bar
                Constraint::Length(1),  // Status bar
                Constraint::Length(1),  // Ticker
                Constraint::Length(6),  // Price cards
                Constraint::Min(10),    // Chart + stats
                Constraint::Length(12), // Market table + news
                Constraint::Length(1),  // Keybindings help
            ])
            .split(area);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
            .split(rows[4]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[5]);

        Self {
            nav: rows[0],
            status: rows[1],
            ticker: rows[2],
            cards: rows[3],
            chart: middle[0],
            stats: middle[1],
            market: bottom[0],
            news: bottom[1],
            help: rows[6],
        }
    }
}

/// Areas of a commodity detail page.
#[derive(Debug, Clone, Copy)]
pub struct DetailLayout {
    pub nav: Rect,
    pub status: Rect,
    pub breadcrumb: Rect,
    pub header: Rect,
    pub chart: Rect,
    pub stats: Rect,
    pub news: Rect,
    pub related: Rect,
    pub help: Rect,
}

impl DetailLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // Nav bar
                Constraint::Length(1),  // Status bar
                Constraint::Length(1),  // Breadcrumb
                Constraint::Length(5),  // Price header
                Constraint::Min(10),    // Chart + stats
                Constraint::Length(10), // News + related commodities
                Constraint::Length(1),  // Keybindings help
            ])
            .split(area);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
            .split(rows[4]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[5]);

        Self {
            nav: rows[0],
            status: rows[1],
            breadcrumb: rows[2],
            header: rows[3],
            chart: middle[0],
            stats: middle[1],
            news: bottom[0],
            related: bottom[1],
            help: rows[6],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_plot_lies_inside_chart_panel() {
        let area = Rect::new(0, 0, 120, 40);
        for route in [Route::Landing, Route::Commodity("WTI".into())] {
            let plot = chart_plot(&route, area);
            let chart = match route {
                Route::Landing => LandingLayout::new(area).chart,
                Route::Commodity(_) => DetailLayout::new(area).chart,
            };
            assert!(plot.width > 0 && plot.height > 0);
            assert_eq!(plot.intersection(chart), plot);
        }
    }

    #[test]
    fn tiny_terminal_yields_empty_plot() {
        let plot = chart_plot(&Route::Landing, Rect::new(0, 0, 10, 5));
        assert_eq!(plot.area(), 0);
    }
}
