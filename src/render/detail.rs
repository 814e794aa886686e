//! Commodity detail page: header, page metadata, and related commodities.

use rust_decimal::Decimal;

use super::format::{
    Trend, format_change_with_percent, format_currency, format_percent, format_volume,
};
use super::{Label, NodeId, NodeIds, StatItem, Tone};
use crate::models::Price;
use crate::routes::{Link, commodity_path};

/// Heading of the detail page news panel.
pub const RELATED_NEWS_TITLE: &str = "Latest News";

const RELATED_COMMODITIES_LEN: usize = 6;

/// Price header of a detail page, plus the page metadata derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailHeader {
    /// Window title, e.g. `Crude Oil WTI Price Today $80.00 (-1.23%) — Live Oil Prices`.
    pub title: String,
    pub description: String,
    pub breadcrumb: Label,
    pub symbol: Label,
    pub name: Label,
    pub price: Label,
    pub change: Label,
    pub stats: Vec<StatItem>,
}

/// Full render of the header for `p`.
pub fn render_detail_header(p: &Price, ids: &mut NodeIds) -> DetailHeader {
    let trend = Trend::of(p.change);
    DetailHeader {
        title: document_title(p),
        description: meta_description(p),
        breadcrumb: Label::plain(ids, p.name.clone()),
        symbol: Label::plain(ids, p.symbol.clone()),
        name: Label::plain(ids, p.name.clone()),
        price: Label::plain(ids, format_currency(p.price)),
        change: Label::new(
            ids,
            format_change_with_percent(p.change, p.change_pct),
            trend.tone(),
        ),
        stats: detail_stats(p, ids),
    }
}

impl DetailHeader {
    /// Refreshes the header in place.
    ///
    /// The fixed labels keep their ids; the stats row is rebuilt.
    pub fn update(&mut self, p: &Price, ids: &mut NodeIds) {
        let trend = Trend::of(p.change);
        self.title = document_title(p);
        self.description = meta_description(p);
        self.breadcrumb.set(p.name.clone(), Tone::Neutral);
        self.symbol.set(p.symbol.clone(), Tone::Neutral);
        self.name.set(p.name.clone(), Tone::Neutral);
        self.price.set(format_currency(p.price), Tone::Neutral);
        self.change.set(
            format_change_with_percent(p.change, p.change_pct),
            trend.tone(),
        );
        self.stats = detail_stats(p, ids);
    }
}

fn signed_pct(p: &Price) -> String {
    format_percent(p.change_pct, Trend::of(p.change))
}

fn document_title(p: &Price) -> String {
    format!(
        "{} Price Today {} ({}) — Live Oil Prices",
        p.name,
        format_currency(p.price),
        signed_pct(p)
    )
}

fn meta_description(p: &Price) -> String {
    format!(
        "{} price today is {} ({}). Live {} chart, real-time data, day high {}, day low {}. Updated every 15 seconds.",
        p.name,
        format_currency(p.price),
        signed_pct(p),
        p.symbol,
        format_currency(p.high),
        format_currency(p.low)
    )
}

fn detail_stats(p: &Price, ids: &mut NodeIds) -> Vec<StatItem> {
    let range = format!("{} — {}", format_currency(p.low), format_currency(p.high));
    vec![
        StatItem::new(ids, "Day High", format_currency(p.high), Tone::Neutral),
        StatItem::new(ids, "Day Low", format_currency(p.low), Tone::Neutral),
        StatItem::new(ids, "Volume", format_volume(Decimal::from(p.volume)), Tone::Neutral),
        StatItem::new(ids, "Day Range", range, Tone::Neutral),
    ]
}

/// Canonical link of a commodity page under `site`.
pub fn canonical_url(site: &str, symbol: &str) -> String {
    format!("{}{}", site.trim_end_matches('/'), commodity_path(symbol))
}

/// Title of the detail page chart panel.
pub fn chart_title(name: &str) -> String {
    format!("{name} Price Chart")
}

/// A small card linking to another commodity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedCard {
    pub id: NodeId,
    pub symbol: String,
    pub name: String,
    pub price: String,
    pub change: Label,
    pub link: Link,
}

/// Cards for the first six prices other than `current`, in backend order.
pub fn render_related_commodities(
    prices: &[Price],
    current: &str,
    ids: &mut NodeIds,
) -> Vec<RelatedCard> {
    prices
        .iter()
        .filter(|p| p.symbol != current)
        .take(RELATED_COMMODITIES_LEN)
        .map(|p| {
            let trend = Trend::of(p.change);
            RelatedCard {
                id: ids.mint(),
                symbol: p.symbol.clone(),
                name: p.name.clone(),
                price: format_currency(p.price),
                change: Label::new(ids, format_percent(p.change_pct, trend), trend.tone()),
                link: Link::commodity(&p.symbol),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::render::prices::tests::price;

    fn wti() -> Price {
        let mut p = price("WTI", dec!(80.00), dec!(-1.00), dec!(-1.23));
        p.name = "Crude Oil WTI".to_string();
        p.high = dec!(82.00);
        p.low = dec!(79.50);
        p
    }

    #[test]
    fn header_text() {
        let mut ids = NodeIds::new();
        let header = render_detail_header(&wti(), &mut ids);

        assert_eq!(
            header.title,
            "Crude Oil WTI Price Today $80.00 (-1.23%) — Live Oil Prices"
        );
        assert_eq!(
            header.description,
            "Crude Oil WTI price today is $80.00 (-1.23%). Live WTI chart, real-time data, \
             day high $82.00, day low $79.50. Updated every 15 seconds."
        );
        assert_eq!(header.breadcrumb.text, "Crude Oil WTI");
        assert_eq!(header.change.text, "-1.00 (-1.23%)");
        assert_eq!(header.change.tone, Tone::Negative);

        let stats: Vec<_> = header
            .stats
            .iter()
            .map(|s| (s.label, s.value.text.as_str()))
            .collect();
        assert_eq!(
            stats,
            [
                ("Day High", "$82.00"),
                ("Day Low", "$79.50"),
                ("Volume", "1.3M"),
                ("Day Range", "$79.50 — $82.00"),
            ]
        );
    }

    #[test]
    fn update_keeps_label_identity() {
        let mut ids = NodeIds::new();
        let mut header = render_detail_header(&wti(), &mut ids);
        let price_id = header.price.id;

        let mut next = wti();
        next.price = dec!(81.10);
        next.change = dec!(0.10);
        next.change_pct = dec!(0.12);
        header.update(&next, &mut ids);

        assert_eq!(header.price.id, price_id);
        assert_eq!(header.price.text, "$81.10");
        assert_eq!(header.change.text, "+0.10 (+0.12%)");
        assert_eq!(header.change.tone, Tone::Positive);
        assert!(header.title.contains("(+0.12%)"));
    }

    #[test]
    fn canonical_url_joins_site_and_path() {
        assert_eq!(
            canonical_url("https://liveoilprices.com/", "BRENT"),
            "https://liveoilprices.com/commodity/BRENT"
        );
    }

    #[test]
    fn related_commodities_skip_current_and_cap_at_six() {
        let prices: Vec<_> = ["WTI", "BRENT", "NATGAS", "HEATING", "RBOB", "OPEC", "DUBAI", "WCS"]
            .iter()
            .map(|s| price(s, dec!(10), dec!(-0.5), dec!(-4.76)))
            .collect();
        let mut ids = NodeIds::new();
        let cards = render_related_commodities(&prices, "BRENT", &mut ids);

        let symbols: Vec<_> = cards.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, ["WTI", "NATGAS", "HEATING", "RBOB", "OPEC", "DUBAI"]);
        assert_eq!(cards[0].price, "$10.00");
        assert_eq!(cards[0].change.text, "-4.76%");
        assert_eq!(cards[0].link.href(), "/commodity/WTI");
    }

    #[test]
    fn chart_title_uses_series_name() {
        assert_eq!(chart_title("Brent Crude"), "Brent Crude Price Chart");
    }
}
