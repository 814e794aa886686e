//! Chart summary statistics and the crosshair readout.

use rust_decimal::Decimal;

use super::format::{Trend, fixed, format_currency, format_volume};
use super::{Label, NodeIds, StatItem, Tone};
use crate::chart::CrosshairValues;
use crate::models::Ohlcv;

/// Text shown in the readout before the pointer touches the chart.
const READOUT_PLACEHOLDER: &str = "--";

/// Figures derived from one loaded series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartStats {
    /// Last close minus first open.
    pub change: Decimal,
    pub change_pct: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub avg_volume: Decimal,
    pub last_close: Decimal,
}

impl ChartStats {
    /// Computes the stats for `data`, or `None` for an empty series.
    ///
    /// A zero first open yields a zero percent change.
    pub fn compute(data: &[Ohlcv]) -> Option<Self> {
        let first = data.first()?;
        let last = data.last()?;

        let change = last.close - first.open;
        let change_pct = change
            .checked_div(first.open)
            .map(|ratio| ratio * Decimal::ONE_HUNDRED)
            .unwrap_or_default();

        let mut high = first.high;
        let mut low = first.low;
        let mut total_volume = Decimal::ZERO;
        for bar in data {
            high = high.max(bar.high);
            low = low.min(bar.low);
            total_volume += Decimal::from(bar.volume);
        }

        Some(Self {
            change,
            change_pct,
            high,
            low,
            avg_volume: total_volume / Decimal::from(data.len()),
            last_close: last.close,
        })
    }
}

/// Builds the stats panel; no stats means an empty panel.
pub fn render_chart_stats(stats: Option<&ChartStats>, ids: &mut NodeIds) -> Vec<StatItem> {
    let Some(stats) = stats else {
        return Vec::new();
    };

    let trend = Trend::of(stats.change);
    let sign = trend.sign();
    let change = format!(
        "{sign}${} ({sign}{}%)",
        fixed(stats.change, 2),
        fixed(stats.change_pct, 2)
    );

    vec![
        StatItem::new(ids, "Period Change", change, trend.tone()),
        StatItem::new(ids, "Period High", format_currency(stats.high), Tone::Neutral),
        StatItem::new(ids, "Period Low", format_currency(stats.low), Tone::Neutral),
        StatItem::new(ids, "Avg Volume", format_volume(stats.avg_volume), Tone::Neutral),
        StatItem::new(ids, "Last Close", format_currency(stats.last_close), Tone::Neutral),
    ]
}

/// O/H/L/C/V values of the bar under the crosshair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartReadout {
    pub open: Label,
    pub high: Label,
    pub low: Label,
    pub close: Label,
    pub volume: Label,
}

impl ChartReadout {
    pub fn new(ids: &mut NodeIds) -> Self {
        Self {
            open: Label::plain(ids, READOUT_PLACEHOLDER),
            high: Label::plain(ids, READOUT_PLACEHOLDER),
            low: Label::plain(ids, READOUT_PLACEHOLDER),
            close: Label::plain(ids, READOUT_PLACEHOLDER),
            volume: Label::plain(ids, READOUT_PLACEHOLDER),
        }
    }

    pub fn apply(&mut self, values: &CrosshairValues) {
        self.open.set(format_currency(values.open), Tone::Neutral);
        self.high.set(format_currency(values.high), Tone::Neutral);
        self.low.set(format_currency(values.low), Tone::Neutral);
        self.close.set(format_currency(values.close), Tone::Neutral);
        self.volume
            .set(format_volume(Decimal::from(values.volume)), Tone::Neutral);
    }
}
