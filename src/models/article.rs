//! Article model and fetch outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single news article as returned by the upstream API.
///
/// Standardized shape regardless of which endpoint produced it; the
/// reader core treats it as opaque and hands it to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Article page URL, doubles as the identifier
    pub url: String,

    /// Headline
    pub title: String,

    /// Publisher name (e.g. "Reuters")
    pub source_name: String,

    /// Author, when the upstream reports one
    pub author: Option<String>,

    /// Short description / teaser
    pub description: Option<String>,

    /// Publication timestamp
    pub published_at: Option<DateTime<Utc>>,

    /// Lead image URL
    pub image_url: Option<String>,
}

impl Article {
    /// Create an article with the required fields
    pub fn new(url: impl Into<String>, title: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            source_name: source_name.into(),
            author: None,
            description: None,
            published_at: None,
            image_url: None,
        }
    }

    /// Set the author
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the publication timestamp
    pub fn published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    /// Set the lead image URL
    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Publication date formatted as `YYYY-MM-DD`, empty when unknown
    pub fn published_date(&self) -> String {
        self.published_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// What the upstream API reported for a fetch.
///
/// Transport-level failures (connection refused, malformed body) are
/// not represented here; those surface as
/// [`SourceError`](crate::sources::SourceError) from the source call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FetchOutcome {
    /// The API answered with a result page
    Success {
        /// Total matching articles across all pages
        total_results: u32,
        /// Articles on the requested page
        articles: Vec<Article>,
    },

    /// The API reported a failure; the message is shown verbatim
    ApiError { message: String },
}

impl FetchOutcome {
    /// Successful outcome helper
    pub fn success(total_results: u32, articles: Vec<Article>) -> Self {
        Self::Success {
            total_results,
            articles,
        }
    }

    /// API-error outcome helper
    pub fn api_error(message: impl Into<String>) -> Self {
        Self::ApiError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_article_builder() {
        let article = Article::new("https://example.com/a", "Headline", "Example News")
            .author("Jane Doe")
            .description("Short teaser.")
            .published_at(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());

        assert_eq!(article.title, "Headline");
        assert_eq!(article.author, Some("Jane Doe".to_string()));
        assert_eq!(article.published_date(), "2024-05-01");
    }

    #[test]
    fn test_published_date_missing() {
        let article = Article::new("https://example.com/a", "Headline", "Example News");
        assert_eq!(article.published_date(), "");
    }

    #[test]
    fn test_fetch_outcome_helpers() {
        let ok = FetchOutcome::success(3, Vec::new());
        assert!(matches!(ok, FetchOutcome::Success { total_results: 3, .. }));

        let err = FetchOutcome::api_error("apiKeyMissing");
        assert!(matches!(err, FetchOutcome::ApiError { ref message } if message == "apiKeyMissing"));
    }
}
