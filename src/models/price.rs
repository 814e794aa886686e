//! Spot price snapshot models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest quote for a single tracked commodity.
///
/// `symbol` is the only identity a price has; every poll replaces the
/// whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub symbol: String,
    pub name: String,
    pub price: Decimal,
    /// Absolute change since the previous close.
    pub change: Decimal,
    pub change_pct: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub volume: u64,
    pub updated_at: DateTime<Utc>,
}

impl Price {
    /// Returns `true` when the change counts as an up move (zero included).
    pub fn is_positive(&self) -> bool {
        self.change >= Decimal::ZERO
    }
}
