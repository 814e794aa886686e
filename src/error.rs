//! Crate-level error types.
//!
//! [`OilwatchError`] unifies every error source (configuration, HTTP,
//! JSON, terminal I/O) behind a single enum so callers can match on the
//! variant they care about while still using the `?` operator for easy
//! propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OilwatchError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum OilwatchError {
    /// An environment variable held an unusable value.
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced a usable response (connect, read, decode).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status code.
    #[error("API error: {0}")]
    Status(u16),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal or log file I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// A page path did not match any known page.
    #[error("unknown page: {0}")]
    Route(String),
}

impl OilwatchError {
    /// Returns the HTTP status code carried by a [`OilwatchError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
