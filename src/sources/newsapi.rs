//! NewsAPI-compatible HTTP source implementation.
//!
//! Speaks the `/v2/top-headlines` and `/v2/everything` endpoints. A
//! non-empty free-text query selects `/everything`; otherwise the
//! category/country filters go to `/top-headlines`. The two are never
//! mixed, matching the upstream contract.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::models::{Article, FetchOutcome, PaginationParameters, SearchParameters};
use crate::sources::{NewsSource, SourceError};

/// Default API base for the hosted service.
pub const DEFAULT_API_BASE: &str = "https://newsapi.org/v2";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// NewsAPI-compatible news source.
#[derive(Debug, Clone)]
pub struct NewsApiSource {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl NewsApiSource {
    /// Create a source against the hosted API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE, DEFAULT_TIMEOUT)
    }

    /// Create a source against a custom base URL (self-hosted or test
    /// server) with an explicit request timeout.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        let base_url: String = base_url.into();
        Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build the request URL for the given parameters.
    ///
    /// `page` and `pageSize` are always sent; main keys only when set.
    fn build_url(&self, main: &SearchParameters, pagination: &PaginationParameters) -> String {
        let mut url = if main.q.is_empty() {
            let mut url = format!("{}/top-headlines?", self.base_url);
            if !main.category.is_empty() {
                url.push_str(&format!("category={}&", urlencoding::encode(&main.category)));
            }
            if !main.country.is_empty() {
                url.push_str(&format!("country={}&", urlencoding::encode(&main.country)));
            }
            url
        } else {
            format!(
                "{}/everything?q={}&",
                self.base_url,
                urlencoding::encode(&main.q)
            )
        };

        url.push_str(&format!(
            "page={}&pageSize={}",
            pagination.page, pagination.page_size
        ));
        url
    }
}

#[async_trait]
impl NewsSource for NewsApiSource {
    fn id(&self) -> &str {
        "newsapi"
    }

    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch(
        &self,
        main: &SearchParameters,
        pagination: &PaginationParameters,
    ) -> Result<FetchOutcome, SourceError> {
        let url = self.build_url(main, pagination);
        tracing::debug!(url = %url, "requesting news page");

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to reach news API: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response body: {}", e)))?;

        // Error responses also carry a JSON envelope; only an
        // unparsable body is treated as transport failure.
        let data: Envelope = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                SourceError::Parse(format!("Failed to parse JSON: {}", e))
            } else {
                SourceError::Api(format!("news API returned status {}", status))
            }
        })?;

        if data.status == "ok" {
            let articles = data.articles.into_iter().map(parse_article).collect();
            Ok(FetchOutcome::success(
                data.total_results.unwrap_or(0),
                articles,
            ))
        } else {
            let message = data
                .message
                .or(data.code)
                .unwrap_or_else(|| format!("news API returned status {}", status));
            Ok(FetchOutcome::api_error(message))
        }
    }
}

fn parse_article(wire: WireArticle) -> Article {
    let mut article = Article::new(
        wire.url,
        wire.title.unwrap_or_default(),
        wire.source.name.unwrap_or_default(),
    );
    article.author = wire.author.filter(|a| !a.is_empty());
    article.description = wire.description.filter(|d| !d.is_empty());
    article.published_at = wire.published_at;
    article.image_url = wire.url_to_image;
    article
}

// ===== Wire types =====

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(rename = "totalResults")]
    total_results: Option<u32>,
    #[serde(default)]
    articles: Vec<WireArticle>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireArticle {
    #[serde(default)]
    source: WireSourceRef,
    author: Option<String>,
    title: Option<String>,
    description: Option<String>,
    url: String,
    #[serde(rename = "urlToImage")]
    url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
struct WireSourceRef {
    name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaginationParameters, SearchParameters};

    fn source() -> NewsApiSource {
        NewsApiSource::with_base_url("test-key", "https://api.example.com/v2/", DEFAULT_TIMEOUT)
    }

    fn pagination(page: u32, page_size: u32) -> PaginationParameters {
        PaginationParameters { page, page_size }
    }

    #[test]
    fn test_build_url_top_headlines() {
        let main = SearchParameters {
            q: String::new(),
            category: "science".to_string(),
            country: "us".to_string(),
        };
        let url = source().build_url(&main, &pagination(2, 20));
        assert_eq!(
            url,
            "https://api.example.com/v2/top-headlines?category=science&country=us&page=2&pageSize=20"
        );
    }

    #[test]
    fn test_build_url_top_headlines_no_filters() {
        let url = source().build_url(&SearchParameters::default(), &pagination(1, 20));
        assert_eq!(
            url,
            "https://api.example.com/v2/top-headlines?page=1&pageSize=20"
        );
    }

    #[test]
    fn test_build_url_everything_for_query() {
        let main = SearchParameters {
            q: "climate change".to_string(),
            category: String::new(),
            country: String::new(),
        };
        let url = source().build_url(&main, &pagination(1, 50));
        assert_eq!(
            url,
            "https://api.example.com/v2/everything?q=climate%20change&page=1&pageSize=50"
        );
    }

    #[test]
    fn test_parse_article_fills_defaults() {
        let wire: WireArticle = serde_json::from_str(
            r#"{
                "source": {"id": null, "name": "Example News"},
                "author": "",
                "title": "Headline",
                "description": null,
                "url": "https://example.com/a",
                "urlToImage": null,
                "publishedAt": "2024-05-01T12:00:00Z"
            }"#,
        )
        .unwrap();

        let article = parse_article(wire);
        assert_eq!(article.title, "Headline");
        assert_eq!(article.source_name, "Example News");
        assert_eq!(article.author, None);
        assert_eq!(article.published_date(), "2024-05-01");
    }

    #[test]
    fn test_envelope_error_shape() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#,
        )
        .unwrap();
        assert_eq!(envelope.status, "error");
        assert_eq!(envelope.message.as_deref(), Some("Your API key is invalid."));
        assert!(envelope.articles.is_empty());
    }
}
