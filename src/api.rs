//! Read-only client for the market data backend.
//!
//! Six endpoints, one GET each. There is no caching, no retry, and no
//! client-side timeout: every call is a fresh round-trip and every failure
//! is handed straight back to the caller.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{ChartData, MarketAnalysis, NewsArticle, Prediction, Price};
use crate::{OilwatchError, Result};

/// History window requested when the caller does not pick one.
pub const DEFAULT_CHART_DAYS: u32 = 90;

/// The backend operations the pages depend on.
///
/// Object-safe so page runtimes can hold an `Arc<dyn MarketApi>` and tests
/// can substitute canned data.
#[async_trait]
pub trait MarketApi: Send + Sync {
    /// Latest quote for every tracked symbol, in backend order.
    async fn get_prices(&self) -> Result<Vec<Price>>;

    /// `days` of history for `symbol`.
    async fn get_chart_data(&self, symbol: &str, days: u32) -> Result<ChartData>;

    /// The aggregated news feed, newest first as served.
    async fn get_news(&self) -> Result<Vec<NewsArticle>>;

    /// A single article by id.
    async fn get_news_article(&self, id: &str) -> Result<NewsArticle>;

    async fn get_predictions(&self) -> Result<Vec<Prediction>>;

    async fn get_analysis(&self) -> Result<MarketAnalysis>;
}

/// [`MarketApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client rooted at `base_url` (no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns [`OilwatchError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("oilwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a client that reuses an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues a GET for `path` and decodes the JSON body.
    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(path, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OilwatchError::Status(status.as_u16()));
        }

        Ok(response.json::<T>().await?)
    }
}

/// Path for a symbol's chart history.
pub fn chart_path(symbol: &str, days: u32) -> String {
    format!("/api/charts/{}?days={days}", urlencoding::encode(symbol))
}

/// Path for a single news article.
pub fn news_article_path(id: &str) -> String {
    format!("/api/news/{}", urlencoding::encode(id))
}

#[async_trait]
impl MarketApi for ApiClient {
    async fn get_prices(&self) -> Result<Vec<Price>> {
        self.fetch_json("/api/prices").await
    }

    async fn get_chart_data(&self, symbol: &str, days: u32) -> Result<ChartData> {
        self.fetch_json(&chart_path(symbol, days)).await
    }

    async fn get_news(&self) -> Result<Vec<NewsArticle>> {
        self.fetch_json("/api/news").await
    }

    async fn get_news_article(&self, id: &str) -> Result<NewsArticle> {
        self.fetch_json(&news_article_path(id)).await
    }

    async fn get_predictions(&self) -> Result<Vec<Prediction>> {
        self.fetch_json("/api/predictions").await
    }

    async fn get_analysis(&self) -> Result<MarketAnalysis> {
        self.fetch_json("/api/analysis").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_path_carries_days() {
        assert_eq!(chart_path("WTI", 90), "/api/charts/WTI?days=90");
        assert_eq!(chart_path("BRENT", 365), "/api/charts/BRENT?days=365");
    }

    #[test]
    fn path_segments_are_encoded() {
        assert_eq!(chart_path("A/B", 7), "/api/charts/A%2FB?days=7");
        assert_eq!(news_article_path("x y"), "/api/news/x%20y");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::with_client(reqwest::Client::new(), "http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
