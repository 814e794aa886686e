//! Presentation model for both pages.
//!
//! Renderers turn domain records into view nodes: plain structs of display
//! text, a [`Tone`], and a stable [`NodeId`]. The terminal painters in
//! [`crate::tui`] draw these nodes and never format numbers themselves.
//!
//! Two render modes exist. A full render rebuilds a section and mints new
//! node ids. An incremental update (see [`PriceGrid::update_price_values`])
//! looks nodes up by key and rewrites only their text and tone, so node
//! identity survives a refresh.

pub mod detail;
pub mod format;
pub mod news;
pub mod prices;
pub mod stats;

pub use detail::{
    DetailHeader, RELATED_NEWS_TITLE, RelatedCard, canonical_url, chart_title, render_detail_header,
    render_related_commodities,
};
pub use format::{
    Trend, fixed, format_change, format_change_with_percent, format_currency, format_percent,
    format_time_ago, format_volume, sign_prefix,
};
pub use news::{
    ALL_CATEGORY, NEWS_CATEGORIES, NO_ARTICLES, NewsCard, NewsGrid, NewsSection, filter_news,
    related_categories, render_news_cards, select_related_news,
};
pub use prices::{
    MarketRow, PriceCard, PriceGrid, TOP_CARD_SYMBOLS, TickerItem, render_market_table,
    render_ticker,
};
pub use stats::{ChartReadout, ChartStats, render_chart_stats};

/// Stable identity of a rendered node.
///
/// Ids are unique within the page that minted them and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

/// Mints [`NodeId`]s for one page.
#[derive(Debug, Default)]
pub struct NodeIds {
    next: u64,
}

impl NodeIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh id.
    pub fn mint(&mut self) -> NodeId {
        self.next += 1;
        NodeId(self.next)
    }
}

/// Colour class of a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Tone {
    /// CSS-style class name, empty for neutral text.
    pub fn class(&self) -> &'static str {
        match self {
            Tone::Positive => "positive",
            Tone::Negative => "negative",
            Tone::Neutral => "",
        }
    }
}

/// A text node whose content can be rewritten in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub id: NodeId,
    pub text: String,
    pub tone: Tone,
}

impl Label {
    pub fn new(ids: &mut NodeIds, text: impl Into<String>, tone: Tone) -> Self {
        Self {
            id: ids.mint(),
            text: text.into(),
            tone,
        }
    }

    /// A neutral label.
    pub fn plain(ids: &mut NodeIds, text: impl Into<String>) -> Self {
        Self::new(ids, text, Tone::Neutral)
    }

    /// Rewrites text and tone, keeping the id.
    pub fn set(&mut self, text: impl Into<String>, tone: Tone) {
        self.text = text.into();
        self.tone = tone;
    }
}

/// One "label: value" cell of a stats panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatItem {
    pub label: &'static str,
    pub value: Label,
}

impl StatItem {
    pub fn new(
        ids: &mut NodeIds,
        label: &'static str,
        value: impl Into<String>,
        tone: Tone,
    ) -> Self {
        Self {
            label,
            value: Label::new(ids, value, tone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_ids_are_unique() {
        let mut ids = NodeIds::new();
        let a = ids.mint();
        let b = ids.mint();
        assert_ne!(a, b);
    }

    #[test]
    fn label_set_keeps_identity() {
        let mut ids = NodeIds::new();
        let mut label = Label::plain(&mut ids, "$1.00");
        let id = label.id;
        label.set("$2.00", Tone::Positive);
        assert_eq!(label.id, id);
        assert_eq!(label.text, "$2.00");
        assert_eq!(label.tone.class(), "positive");
    }
}
