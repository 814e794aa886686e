//! Landing page controller.

use chrono::{DateTime, Utc};
use tracing::{debug, error};

use super::{ChartPanel, Effect, Loaded, PriceSlot};
use crate::api::DEFAULT_CHART_DAYS;
use crate::models::{NewsArticle, Price};
use crate::render::{
    ALL_CATEGORY, MarketRow, NewsSection, NodeIds, PriceGrid, TickerItem, render_market_table,
    render_ticker,
};
use crate::routes::{FALLBACK_SYMBOL, Link, Navigation};

/// State of the market overview page.
#[derive(Debug)]
pub struct LandingController {
    ids: NodeIds,
    clock: fn() -> DateTime<Utc>,

    symbol: String,
    days: u32,
    category: String,
    /// Last fetched feed, kept so filtering needs no fetch.
    news: Vec<NewsArticle>,

    ticker: Vec<TickerItem>,
    grid: PriceGrid,
    table: Vec<MarketRow>,
    news_section: Option<NewsSection>,
    chart: ChartPanel,
}

impl LandingController {
    pub fn new(chart_size: (u16, u16)) -> Self {
        let mut ids = NodeIds::new();
        let chart = ChartPanel::new(chart_size, &mut ids);
        Self {
            ids,
            clock: Utc::now,
            symbol: FALLBACK_SYMBOL.to_string(),
            days: DEFAULT_CHART_DAYS,
            category: ALL_CATEGORY.to_string(),
            news: Vec::new(),
            ticker: Vec::new(),
            grid: PriceGrid::new(),
            table: Vec::new(),
            news_section: None,
            chart,
        }
    }

    /// Replaces the wall clock used for article ages.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// First load: prices, chart, and news, all independent.
    pub fn boot(&mut self) -> Vec<Effect> {
        vec![
            Effect::FetchPrices(PriceSlot::Initial),
            self.chart.load(&self.symbol, self.days),
            Effect::FetchNews,
        ]
    }

    /// Periodic price poll.
    pub fn refresh_tick(&mut self) -> Vec<Effect> {
        vec![Effect::FetchPrices(PriceSlot::Refresh)]
    }

    /// Switches the chart to another symbol.
    pub fn select_symbol(&mut self, symbol: &str) -> Vec<Effect> {
        self.symbol = symbol.to_string();
        vec![self.chart.load(&self.symbol, self.days)]
    }

    /// Switches the chart to another history window.
    pub fn select_timeframe(&mut self, days: u32) -> Vec<Effect> {
        self.days = days;
        vec![self.chart.load(&self.symbol, self.days)]
    }

    /// Re-filters the held news. Never fetches.
    pub fn select_category(&mut self, category: &str) {
        self.category = category.to_string();
        self.render_news();
    }

    pub fn pointer_moved(&mut self, column: u16) {
        self.chart.pointer_moved(column);
    }

    pub fn pointer_left(&mut self) {
        self.chart.pointer_left();
    }

    pub fn resize_chart(&mut self, width: u16, height: u16) {
        self.chart.resize(width, height);
    }

    pub fn open_price_card(&self, index: usize) -> Option<Effect> {
        navigate(&self.grid.cards().get(index)?.link)
    }

    pub fn open_market_row(&self, index: usize) -> Option<Effect> {
        navigate(&self.table.get(index)?.link)
    }

    pub fn open_ticker_item(&self, index: usize) -> Option<Effect> {
        navigate(&self.ticker.get(index)?.link)
    }

    pub fn open_featured_news(&self) -> Option<Effect> {
        navigate(&self.news_section.as_ref()?.featured.as_ref()?.link)
    }

    /// Opens the `index`-th card below the featured slot.
    pub fn open_news_card(&self, index: usize) -> Option<Effect> {
        let card = self.news_section.as_ref()?.cards().nth(index + 1)?;
        navigate(&card.link)
    }

    /// Folds a finished fetch into the page.
    ///
    /// A failed fetch is logged and leaves its section as it was.
    pub fn apply(&mut self, loaded: Loaded) {
        match loaded {
            Loaded::Prices { slot, result } => match result {
                Ok(prices) => self.apply_prices(slot, &prices),
                Err(e) => error!(?slot, "failed to load prices: {e}"),
            },
            Loaded::Chart { seq, result } => {
                self.chart.apply(seq, result, &mut self.ids);
            }
            Loaded::News(result) => match result {
                Ok(news) => {
                    self.news = news;
                    self.render_news();
                }
                Err(e) => error!("failed to load news: {e}"),
            },
        }
    }

    fn apply_prices(&mut self, slot: PriceSlot, prices: &[Price]) {
        match slot {
            PriceSlot::Initial => self.grid.render(prices, &mut self.ids),
            PriceSlot::Refresh => self.grid.update_price_values(prices),
            PriceSlot::Header | PriceSlot::Related => {
                debug!(?slot, "price slot not used on the landing page");
                return;
            }
        }
        self.ticker = render_ticker(prices, &mut self.ids);
        self.table = render_market_table(prices, &mut self.ids);
    }

    fn render_news(&mut self) {
        let now = (self.clock)();
        self.news_section = Some(NewsSection::render(
            &self.news,
            &self.category,
            now,
            &mut self.ids,
        ));
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn ticker(&self) -> &[TickerItem] {
        &self.ticker
    }

    pub fn grid(&self) -> &PriceGrid {
        &self.grid
    }

    pub fn table(&self) -> &[MarketRow] {
        &self.table
    }

    /// The news section, once the feed has loaded.
    pub fn news(&self) -> Option<&NewsSection> {
        self.news_section.as_ref()
    }

    pub fn chart(&self) -> &ChartPanel {
        &self.chart
    }
}

fn navigate(link: &Link) -> Option<Effect> {
    link.navigation().map(Effect::Navigate)
}
