//! Historical candle series models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One bar of price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ohlcv {
    /// Bar start as Unix seconds.
    pub time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
}

impl Ohlcv {
    /// Returns `true` when the bar closed at or above its open.
    pub fn is_rising(&self) -> bool {
        self.close >= self.open
    }
}

/// A symbol's price history over a requested window.
///
/// `data` is ordered ascending by `time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub symbol: String,
    pub name: String,
    /// Bar interval label, e.g. `"1d"`.
    pub interval: String,
    pub data: Vec<Ohlcv>,
}
