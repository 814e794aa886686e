//! Forecast and sentiment models.
//!
//! These are served by the backend and fetchable through
//! [`MarketApi`](crate::api::MarketApi), but no page renders them yet.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Short-horizon price forecast for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub symbol: String,
    pub name: String,
    pub current: Decimal,
    pub predicted: Decimal,
    /// Horizon label, e.g. `"7 days"`.
    pub timeframe: String,
    /// Model confidence in `0.0..=1.0`.
    pub confidence: Decimal,
    /// `"bullish"` or `"bearish"`.
    pub direction: String,
    pub analysis: String,
}

/// Indicator readings backing a [`MarketAnalysis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSignals {
    pub rsi: Decimal,
    pub macd: String,
    pub signal: String,
    pub moving_avg50: Decimal,
    pub moving_avg200: Decimal,
    pub trend: String,
}

/// Market-wide sentiment summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub sentiment: String,
    pub score: Decimal,
    pub summary: String,
    pub key_points: Vec<String>,
    pub technical: TechnicalSignals,
    pub updated_at: DateTime<Utc>,
}
