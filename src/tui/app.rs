//! Application state for the TUI.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::controller::{Effect, Page, TIMEFRAMES};
use crate::render::{NEWS_CATEGORIES, TOP_CARD_SYMBOLS};
use crate::routes::Route;
use crate::runtime::PageId;

use super::ui;

/// How long a status bar notice stays up.
const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Central application state container.
pub struct App {
    // -- Page State --
    /// Controller of the page on screen.
    pub page: Page,
    /// Runtime identity of that page, once started.
    pub page_id: Option<PageId>,
    /// Base of canonical links handed to detail pages.
    pub site_url: String,

    // -- UI State --
    /// Section that receives `↑/↓/Enter`.
    pub focus: Focus,
    /// Selected item within the focused section.
    pub selection: usize,
    /// Plot column of the keyboard crosshair.
    pub crosshair: Option<u16>,
    /// Terminal size.
    pub size: (u16, u16),
    /// Tick counter driving the ticker scroll.
    pub ticks: u64,
    /// Message shown in the status bar (clears after a timeout).
    pub notice: Option<Notice>,

    // -- Internal --
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the app showing `route`. The page is not booted yet.
    pub fn new(route: &Route, site_url: impl Into<String>, size: (u16, u16)) -> Self {
        let site_url = site_url.into();
        let page = Page::for_route(route, chart_size(route, size), &site_url);
        Self {
            focus: Focus::first(&page),
            page,
            page_id: None,
            site_url,
            selection: 0,
            crosshair: None,
            size,
            ticks: 0,
            notice: None,
            should_quit: false,
        }
    }

    /// Boots the current page and returns its initial fetches.
    pub fn boot(&mut self) -> Vec<Effect> {
        self.page.boot()
    }

    /// Replaces the current page with a fresh one for `route` and boots it.
    ///
    /// Everything the old page held is dropped.
    pub fn open(&mut self, route: &Route) -> Vec<Effect> {
        self.page = Page::for_route(route, chart_size(route, self.size), &self.site_url);
        self.page_id = None;
        self.focus = Focus::first(&self.page);
        self.selection = 0;
        self.crosshair = None;
        self.boot()
    }

    /// Tracks a terminal resize and resizes the chart to its new plot.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        let plot = self.chart_plot();
        self.page.resize_chart(plot.width, plot.height);
        self.crosshair = None;
    }

    /// Screen area of the chart plot for the current page and size.
    pub fn chart_plot(&self) -> Rect {
        ui::chart_plot(&self.page.route(), self.area())
    }

    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.size.0, self.size.1)
    }

    /// Moves focus to the next section of the page.
    pub fn next_focus(&mut self) {
        let order = Focus::order(&self.page);
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + 1) % order.len()];
        self.selection = 0;
    }

    /// Moves focus to the previous section of the page.
    pub fn previous_focus(&mut self) {
        let order = Focus::order(&self.page);
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[pos.checked_sub(1).unwrap_or(order.len() - 1)];
        self.selection = 0;
    }

    /// Number of selectable items in the focused section.
    pub fn section_len(&self) -> usize {
        match (&self.page, self.focus) {
            (Page::Landing(page), Focus::Ticker) => page.ticker().len(),
            (Page::Landing(page), Focus::Cards) => page.grid().cards().len(),
            (Page::Landing(page), Focus::Market) => page.table().len(),
            (Page::Landing(page), Focus::News) => page.news().map_or(0, |n| n.cards().count()),
            (Page::Detail(page), Focus::News) => page.news().len(),
            (Page::Detail(page), Focus::Related) => page.related().len(),
            _ => 0,
        }
    }

    pub fn select_next(&mut self) {
        let len = self.section_len();
        if len > 0 && self.selection < len - 1 {
            self.selection += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selection = self.selection.saturating_sub(1);
    }

    /// Opens the selected item, if it leads anywhere.
    pub fn activate(&self) -> Option<Effect> {
        let index = self.selection;
        match (&self.page, self.focus) {
            (Page::Landing(page), Focus::Ticker) => page.open_ticker_item(index),
            (Page::Landing(page), Focus::Cards) => page.open_price_card(index),
            (Page::Landing(page), Focus::Market) => page.open_market_row(index),
            (Page::Landing(page), Focus::News) => match index {
                0 => page.open_featured_news(),
                i => page.open_news_card(i - 1),
            },
            (Page::Detail(page), Focus::News) => page.open_related_news(index),
            (Page::Detail(page), Focus::Related) => page.open_related_commodity(index),
            _ => None,
        }
    }

    /// Switches the landing chart to the next top symbol.
    pub fn cycle_chart_symbol(&mut self) -> Vec<Effect> {
        let Page::Landing(page) = &mut self.page else {
            return Vec::new();
        };
        let pos = TOP_CARD_SYMBOLS
            .iter()
            .position(|s| *s == page.symbol())
            .map_or(0, |i| (i + 1) % TOP_CARD_SYMBOLS.len());
        self.crosshair = None;
        page.select_symbol(TOP_CARD_SYMBOLS[pos])
    }

    /// Selects the `n`-th timeframe (zero-based).
    pub fn select_timeframe(&mut self, n: usize) -> Vec<Effect> {
        let Some((_, days)) = TIMEFRAMES.get(n) else {
            return Vec::new();
        };
        self.crosshair = None;
        self.page.select_timeframe(*days)
    }

    /// Steps the landing news filter forwards or backwards.
    pub fn cycle_category(&mut self, forward: bool) {
        let Page::Landing(page) = &mut self.page else {
            return;
        };
        let len = NEWS_CATEGORIES.len();
        let pos = NEWS_CATEGORIES
            .iter()
            .position(|c| *c == page.category())
            .unwrap_or(0);
        let next = if forward {
            (pos + 1) % len
        } else {
            pos.checked_sub(1).unwrap_or(len - 1)
        };
        page.select_category(NEWS_CATEGORIES[next]);
        if self.focus == Focus::News {
            self.selection = 0;
        }
    }

    /// Moves the keyboard crosshair by `delta` columns.
    pub fn nudge_crosshair(&mut self, delta: i32) {
        let width = self.chart_plot().width;
        if width == 0 {
            return;
        }
        let current = self.crosshair.map_or(i32::from(width) - 1, i32::from);
        let column = (current + delta).clamp(0, i32::from(width) - 1);
        let column = u16::try_from(column).unwrap_or(0);
        self.crosshair = Some(column);
        self.page.pointer_moved(column);
    }

    /// Sets a notice to display.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice {
            message: message.into(),
            timestamp: Instant::now(),
        });
    }

    /// Clears notices older than their timeout.
    pub fn clear_stale_notice(&mut self) {
        if let Some(ref notice) = self.notice
            && notice.timestamp.elapsed() > NOTICE_TTL
        {
            self.notice = None;
        }
    }

    /// Title for the terminal window.
    pub fn window_title(&self) -> String {
        match &self.page {
            Page::Detail(page) => page
                .header()
                .map(|h| h.title.clone())
                .unwrap_or_else(|| format!("{} — Live Oil Prices", page.symbol())),
            Page::Landing(_) => "Live Oil Prices".to_string(),
        }
    }
}

fn chart_size(route: &Route, size: (u16, u16)) -> (u16, u16) {
    let plot = ui::chart_plot(route, Rect::new(0, 0, size.0, size.1));
    (plot.width, plot.height)
}

/// UI focus targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    // Landing page
    Ticker,
    Cards,
    Market,

    // Both pages
    Chart,
    News,

    // Detail page
    Related,
}

impl Focus {
    /// Tab order of the sections of `page`.
    pub fn order(page: &Page) -> &'static [Focus] {
        match page {
            Page::Landing(_) => &[
                Focus::Cards,
                Focus::Chart,
                Focus::Market,
                Focus::News,
                Focus::Ticker,
            ],
            Page::Detail(_) => &[Focus::Chart, Focus::News, Focus::Related],
        }
    }

    fn first(page: &Page) -> Self {
        Self::order(page)[0]
    }
}

/// Status bar message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct Notice {
    pub message: String,
    pub timestamp: Instant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_through_page_sections() {
        let mut app = App::new(&Route::Commodity("WTI".into()), "https://x.test", (120, 40));
        assert_eq!(app.focus, Focus::Chart);
        app.next_focus();
        assert_eq!(app.focus, Focus::News);
        app.next_focus();
        app.next_focus();
        assert_eq!(app.focus, Focus::Chart);
        app.previous_focus();
        assert_eq!(app.focus, Focus::Related);
    }

    #[test]
    fn selection_stays_in_bounds_of_empty_section() {
        let mut app = App::new(&Route::Landing, "https://x.test", (120, 40));
        app.select_next();
        assert_eq!(app.selection, 0);
        assert_eq!(app.activate(), None);
    }

    #[test]
    fn chart_symbol_cycles_through_top_symbols() {
        let mut app = App::new(&Route::Landing, "https://x.test", (120, 40));
        app.boot();
        let effects = app.cycle_chart_symbol();
        assert!(matches!(
            &effects[..],
            [Effect::FetchChart { symbol, .. }] if symbol == "BRENT"
        ));
    }

    #[test]
    fn timeframe_keys_map_to_days() {
        let mut app = App::new(&Route::Landing, "https://x.test", (120, 40));
        let effects = app.select_timeframe(4);
        assert!(matches!(&effects[..], [Effect::FetchChart { days: 365, .. }]));
        assert!(app.select_timeframe(9).is_empty());
    }

    #[test]
    fn category_cycles_both_ways() {
        let mut app = App::new(&Route::Landing, "https://x.test", (120, 40));
        app.cycle_category(false);
        let Page::Landing(page) = &app.page else {
            panic!("expected landing page");
        };
        assert_eq!(page.category(), "Supply");
        app.cycle_category(true);
        let Page::Landing(page) = &app.page else {
            panic!("expected landing page");
        };
        assert_eq!(page.category(), "all");
    }

    #[test]
    fn open_replaces_page_and_resets_ui() {
        let mut app = App::new(&Route::Landing, "https://x.test", (120, 40));
        app.next_focus();
        app.selection = 3;
        let effects = app.open(&Route::Commodity("BRENT".into()));

        assert_eq!(effects.len(), 4);
        assert_eq!(app.page.route(), Route::Commodity("BRENT".into()));
        assert_eq!(app.focus, Focus::Chart);
        assert_eq!(app.selection, 0);
        assert_eq!(app.window_title(), "BRENT — Live Oil Prices");
    }
}
