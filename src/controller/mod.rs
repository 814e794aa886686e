//! Page controllers.
//!
//! A controller owns the view state of one page and is driven purely by
//! calls: user intents and completed fetches go in, [`Effect`]s come out.
//! It never performs I/O itself; the runtime executes the effects and feeds
//! the results back through `apply`.

pub mod chart_panel;
pub mod detail;
pub mod landing;

pub use chart_panel::{CHART_CONTAINER, ChartPanel};
pub use detail::DetailController;
pub use landing::LandingController;

use crate::Result;
use crate::models::{ChartData, NewsArticle, Price};
use crate::routes::{Navigation, Route};

/// Chart timeframes as `(label, days)`, in selector order.
pub const TIMEFRAMES: [(&str, u32); 5] = [
    ("1W", 7),
    ("1M", 30),
    ("3M", 90),
    ("6M", 180),
    ("1Y", 365),
];

/// Which part of a page a price fetch feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSlot {
    /// Landing page first load: full render of every price section.
    Initial,
    /// Landing page timer tick: in-place card update.
    Refresh,
    /// Detail page header.
    Header,
    /// Detail page "other commodities" cards.
    Related,
}

/// Work a controller asks the runtime to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPrices(PriceSlot),
    FetchChart { seq: u64, symbol: String, days: u32 },
    FetchNews,
    /// Leave the current page.
    Navigate(Navigation),
}

/// A finished fetch, routed back to the controller that asked for it.
#[derive(Debug)]
pub enum Loaded {
    Prices {
        slot: PriceSlot,
        result: Result<Vec<Price>>,
    },
    Chart {
        seq: u64,
        result: Result<ChartData>,
    },
    News(Result<Vec<NewsArticle>>),
}

/// Monotonic sequence numbers for one kind of request.
///
/// Only a response carrying the latest issued number may be applied.
#[derive(Debug, Default)]
pub struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next number, superseding every earlier one.
    pub fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

/// The controller of whichever page is showing.
#[derive(Debug)]
pub enum Page {
    Landing(LandingController),
    Detail(DetailController),
}

impl Page {
    /// Creates the controller for `route`.
    ///
    /// `chart_size` is the initial plot area and `site_url` the base of
    /// canonical links.
    pub fn for_route(route: &Route, chart_size: (u16, u16), site_url: &str) -> Self {
        match route {
            Route::Landing => Page::Landing(LandingController::new(chart_size)),
            Route::Commodity(symbol) => {
                Page::Detail(DetailController::new(symbol, chart_size, site_url))
            }
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Page::Landing(_) => Route::Landing,
            Page::Detail(page) => Route::Commodity(page.symbol().to_string()),
        }
    }

    pub fn boot(&mut self) -> Vec<Effect> {
        match self {
            Page::Landing(page) => page.boot(),
            Page::Detail(page) => page.boot(),
        }
    }

    pub fn refresh_tick(&mut self) -> Vec<Effect> {
        match self {
            Page::Landing(page) => page.refresh_tick(),
            Page::Detail(page) => page.refresh_tick(),
        }
    }

    pub fn apply(&mut self, loaded: Loaded) {
        match self {
            Page::Landing(page) => page.apply(loaded),
            Page::Detail(page) => page.apply(loaded),
        }
    }

    pub fn chart(&self) -> &ChartPanel {
        match self {
            Page::Landing(page) => page.chart(),
            Page::Detail(page) => page.chart(),
        }
    }

    pub fn pointer_moved(&mut self, column: u16) {
        match self {
            Page::Landing(page) => page.pointer_moved(column),
            Page::Detail(page) => page.pointer_moved(column),
        }
    }

    pub fn pointer_left(&mut self) {
        match self {
            Page::Landing(page) => page.pointer_left(),
            Page::Detail(page) => page.pointer_left(),
        }
    }

    pub fn resize_chart(&mut self, width: u16, height: u16) {
        match self {
            Page::Landing(page) => page.resize_chart(width, height),
            Page::Detail(page) => page.resize_chart(width, height),
        }
    }

    pub fn select_timeframe(&mut self, days: u32) -> Vec<Effect> {
        match self {
            Page::Landing(page) => page.select_timeframe(days),
            Page::Detail(page) => page.select_timeframe(days),
        }
    }
}
