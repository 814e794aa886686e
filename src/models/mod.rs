//! Typed records returned by the market data backend.
//!
//! Every record is an immutable value received from the API. The client
//! never originates or mutates domain data; it only derives presentation
//! state from it.

pub mod analysis;
pub mod chart;
pub mod news;
pub mod price;

pub use analysis::{MarketAnalysis, Prediction, TechnicalSignals};
pub use chart::{ChartData, Ohlcv};
pub use news::NewsArticle;
pub use price::Price;
