//! News feed models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single article from the aggregated news feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    /// Publisher name.
    pub source: String,
    /// Link to the original story. An empty string on the wire is `None`.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub source_url: Option<String>,
    /// Free-form category used for filtering and related-news selection.
    pub category: String,
    pub published_at: DateTime<Utc>,
    pub image_url: String,
    /// Display label such as `"4 min read"`.
    pub read_time: String,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
