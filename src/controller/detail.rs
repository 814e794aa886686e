//! Commodity detail page controller.

use chrono::{DateTime, Utc};
use tracing::{debug, error};

use super::{ChartPanel, Effect, Loaded, PriceSlot};
use crate::api::DEFAULT_CHART_DAYS;
use crate::models::Price;
use crate::render::{
    DetailHeader, NewsCard, NodeIds, RelatedCard, canonical_url, chart_title, render_detail_header,
    render_news_cards, render_related_commodities, select_related_news,
};
use crate::routes::{Navigation, Route};

/// State of one commodity page.
#[derive(Debug)]
pub struct DetailController {
    ids: NodeIds,
    clock: fn() -> DateTime<Utc>,
    site_url: String,

    symbol: String,
    days: u32,

    header: Option<DetailHeader>,
    /// Set from the first header load and never changed after.
    canonical: Option<String>,
    chart_title: Option<String>,
    chart: ChartPanel,
    news: Vec<NewsCard>,
    related: Vec<RelatedCard>,
}

impl DetailController {
    pub fn new(symbol: &str, chart_size: (u16, u16), site_url: &str) -> Self {
        let mut ids = NodeIds::new();
        let chart = ChartPanel::new(chart_size, &mut ids);
        Self {
            ids,
            clock: Utc::now,
            site_url: site_url.to_string(),
            symbol: symbol.to_uppercase(),
            days: DEFAULT_CHART_DAYS,
            header: None,
            canonical: None,
            chart_title: None,
            chart,
            news: Vec::new(),
            related: Vec::new(),
        }
    }

    /// Replaces the wall clock used for article ages.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// First load: header, chart, related news, and other commodities.
    pub fn boot(&mut self) -> Vec<Effect> {
        vec![
            Effect::FetchPrices(PriceSlot::Header),
            self.chart.load(&self.symbol, self.days),
            Effect::FetchNews,
            Effect::FetchPrices(PriceSlot::Related),
        ]
    }

    /// Periodic poll; only the header refreshes.
    pub fn refresh_tick(&mut self) -> Vec<Effect> {
        vec![Effect::FetchPrices(PriceSlot::Header)]
    }

    pub fn select_timeframe(&mut self, days: u32) -> Vec<Effect> {
        self.days = days;
        vec![self.chart.load(&self.symbol, self.days)]
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

    pub fn open_related_commodity(&self, index: usize) -> Option<Effect> {
        self.related
            .get(index)?
            .link
            .navigation()
            .map(Effect::Navigate)
    }

    pub fn open_related_news(&self, index: usize) -> Option<Effect> {
        self.news.get(index)?.link.navigation().map(Effect::Navigate)
    }

    /// Leaves for the landing page.
    pub fn go_home(&self) -> Effect {
        Effect::Navigate(Navigation::Page(Route::Landing))
    }

    /// Folds a finished fetch into the page.
    ///
    /// A failed fetch is logged and leaves its section as it was.
    pub fn apply(&mut self, loaded: Loaded) {
        match loaded {
            Loaded::Prices { slot, result } => match result {
                Ok(prices) => self.apply_prices(slot, &prices),
                Err(e) => error!(?slot, symbol = %self.symbol, "failed to load prices: {e}"),
            },
            Loaded::Chart { seq, result } => {
                if let Some(data) = self.chart.apply(seq, result, &mut self.ids) {
                    self.chart_title = Some(chart_title(&data.name));
                }
            }
            Loaded::News(result) => match result {
                Ok(news) => {
                    let related = select_related_news(&news, &self.symbol);
                    self.news = render_news_cards(&related, (self.clock)(), &mut self.ids);
                }
                Err(e) => error!("failed to load news: {e}"),
            },
        }
    }

    fn apply_prices(&mut self, slot: PriceSlot, prices: &[Price]) {
        match slot {
            PriceSlot::Header => {
                let Some(price) = prices.iter().find(|p| p.symbol == self.symbol) else {
                    debug!(symbol = %self.symbol, "symbol missing from price feed");
                    return;
                };
                match self.header.as_mut() {
                    Some(header) => header.update(price, &mut self.ids),
                    None => self.header = Some(render_detail_header(price, &mut self.ids)),
                }
                if self.canonical.is_none() {
                    self.canonical = Some(canonical_url(&self.site_url, &price.symbol));
                }
            }
            PriceSlot::Related => {
                self.related = render_related_commodities(prices, &self.symbol, &mut self.ids);
            }
            PriceSlot::Initial | PriceSlot::Refresh => {
                debug!(?slot, "price slot not used on the detail page");
            }
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    /// The header, once this symbol's price has loaded.
    pub fn header(&self) -> Option<&DetailHeader> {
        self.header.as_ref()
    }

    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    pub fn chart_title(&self) -> Option<&str> {
        self.chart_title.as_deref()
    }

    pub fn chart(&self) -> &ChartPanel {
        &self.chart
    }

    pub fn news(&self) -> &[NewsCard] {
        &self.news
    }

    pub fn related(&self) -> &[RelatedCard] {
        &self.related
    }
}
