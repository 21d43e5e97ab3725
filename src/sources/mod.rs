//! News source abstraction.
//!
//! The reader core talks to the upstream API through the [`NewsSource`]
//! trait so that the fetch transport stays swappable: the real
//! [`NewsApiSource`] speaks HTTP, the [`MockSource`] feeds tests.
//!
//! A source call distinguishes two failure planes: an upstream-reported
//! failure arrives as a successful call returning
//! [`FetchOutcome::ApiError`] (its message is user-facing), while
//! transport trouble (connection, HTTP, body shape) is a [`SourceError`].

mod newsapi;

pub mod mock;

pub use mock::MockSource;
pub use newsapi::{NewsApiSource, DEFAULT_API_BASE};

use async_trait::async_trait;

use crate::models::{FetchOutcome, PaginationParameters, SearchParameters};

/// Interface to a paged news backend.
#[async_trait]
pub trait NewsSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "newsapi")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Fetch one page of articles for the given parameters.
    async fn fetch(
        &self,
        main: &SearchParameters,
        pagination: &PaginationParameters,
    ) -> Result<FetchOutcome, SourceError>;
}

/// Transport-level errors from a source.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Upstream answered with an unusable HTTP status
    #[error("API error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}
