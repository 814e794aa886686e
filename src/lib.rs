//! Live oil and energy commodity prices in the terminal.
//!
//! Fetches spot prices, OHLCV history, and market news from the
//! liveoilprices backend and presents them as a landing dashboard and per
//! commodity detail pages, refreshing prices on a fixed period.

pub mod api;
pub mod chart;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod render;
pub mod routes;
pub mod runtime;
pub mod tui;

pub use error::{OilwatchError, Result};
