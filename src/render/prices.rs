//! Ticker strip, price-card grid, and market table.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::format::{
    Trend, format_change, format_change_with_percent, format_currency, format_percent,
    format_volume,
};
use super::{Label, NodeId, NodeIds, Tone};
use crate::models::Price;
use crate::routes::Link;

/// Symbols that get a card on the landing page, in display order.
pub const TOP_CARD_SYMBOLS: [&str; 6] = ["WTI", "BRENT", "NATGAS", "HEATING", "RBOB", "OPEC"];

/// One entry of the scrolling ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerItem {
    pub id: NodeId,
    pub symbol: String,
    pub price: String,
    pub change: Label,
    pub link: Link,
}

/// Builds the ticker from every price, in backend order.
pub fn render_ticker(prices: &[Price], ids: &mut NodeIds) -> Vec<TickerItem> {
    prices
        .iter()
        .map(|p| {
            let trend = Trend::of(p.change);
            TickerItem {
                id: ids.mint(),
                symbol: p.symbol.clone(),
                price: format_currency(p.price),
                change: Label::new(ids, format_percent(p.change_pct, trend), trend.tone()),
                link: Link::commodity(&p.symbol),
            }
        })
        .collect()
}

/// A landing-page price card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceCard {
    pub id: NodeId,
    pub symbol: String,
    pub name: String,
    /// Arrow plus signed percent, e.g. `↓ -1.23%`.
    pub badge: Label,
    pub price: Label,
    pub change: Label,
    pub high: Label,
    pub low: Label,
    pub volume: Label,
    pub link: Link,
}

impl PriceCard {
    fn new(p: &Price, ids: &mut NodeIds) -> Self {
        let trend = Trend::of(p.change);
        Self {
            id: ids.mint(),
            symbol: p.symbol.clone(),
            name: p.name.clone(),
            badge: Label::new(ids, badge_text(p, trend), trend.tone()),
            price: Label::plain(ids, format_currency(p.price)),
            change: Label::new(
                ids,
                format_change_with_percent(p.change, p.change_pct),
                trend.tone(),
            ),
            high: Label::plain(ids, format_currency(p.high)),
            low: Label::plain(ids, format_currency(p.low)),
            volume: Label::plain(ids, format_volume(Decimal::from(p.volume))),
            link: Link::commodity(&p.symbol),
        }
    }

    /// Rewrites every value field from `p`, keeping all node ids.
    fn apply(&mut self, p: &Price) {
        let trend = Trend::of(p.change);
        self.price.set(format_currency(p.price), Tone::Neutral);
        self.change.set(
            format_change_with_percent(p.change, p.change_pct),
            trend.tone(),
        );
        self.badge.set(badge_text(p, trend), trend.tone());
        self.high.set(format_currency(p.high), Tone::Neutral);
        self.low.set(format_currency(p.low), Tone::Neutral);
        self.volume
            .set(format_volume(Decimal::from(p.volume)), Tone::Neutral);
    }
}

fn badge_text(p: &Price, trend: Trend) -> String {
    format!("{} {}", trend.arrow(), format_percent(p.change_pct, trend))
}

/// The top price cards plus a symbol index into them.
///
/// The index is the handle used by incremental refreshes; it is rebuilt on
/// every full render and left alone by [`PriceGrid::update_price_values`].
#[derive(Debug, Default)]
pub struct PriceGrid {
    cards: Vec<PriceCard>,
    by_symbol: HashMap<String, usize>,
}

impl PriceGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the grid from scratch.
    ///
    /// Only [`TOP_CARD_SYMBOLS`] get a card, in that order, whatever order
    /// the backend used.
    pub fn render(&mut self, prices: &[Price], ids: &mut NodeIds) {
        self.cards = TOP_CARD_SYMBOLS
            .iter()
            .filter_map(|symbol| prices.iter().find(|p| p.symbol == *symbol))
            .map(|p| PriceCard::new(p, ids))
            .collect();
        self.by_symbol = self
            .cards
            .iter()
            .enumerate()
            .map(|(i, card)| (card.symbol.clone(), i))
            .collect();
    }

    /// Patches existing cards in place.
    ///
    /// Prices without a card are ignored; no card is added or removed.
    pub fn update_price_values(&mut self, prices: &[Price]) {
        for p in prices {
            if let Some(&index) = self.by_symbol.get(&p.symbol) {
                self.cards[index].apply(p);
            }
        }
    }

    pub fn cards(&self) -> &[PriceCard] {
        &self.cards
    }

    /// Looks a card up by symbol.
    pub fn card(&self, symbol: &str) -> Option<&PriceCard> {
        self.by_symbol.get(symbol).map(|&i| &self.cards[i])
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// A row of the full market table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketRow {
    pub id: NodeId,
    /// First two characters of the symbol.
    pub icon: String,
    pub name: String,
    pub symbol: String,
    pub price: String,
    pub change: Label,
    pub change_pct: Label,
    pub high: String,
    pub low: String,
    pub volume: String,
    pub link: Link,
}

/// Builds one row per price, in backend order.
pub fn render_market_table(prices: &[Price], ids: &mut NodeIds) -> Vec<MarketRow> {
    prices
        .iter()
        .map(|p| {
            let trend = Trend::of(p.change);
            MarketRow {
                id: ids.mint(),
                icon: p.symbol.chars().take(2).collect(),
                name: p.name.clone(),
                symbol: p.symbol.clone(),
                price: format_currency(p.price),
                change: Label::new(ids, format_change(p.change), trend.tone()),
                change_pct: Label::new(ids, format_percent(p.change_pct, trend), trend.tone()),
                high: format_currency(p.high),
                low: format_currency(p.low),
                volume: format_volume(Decimal::from(p.volume)),
                link: Link::commodity(&p.symbol),
            }
        })
        .collect()
}
