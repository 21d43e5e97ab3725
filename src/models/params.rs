//! Search and pagination parameter models.

use serde::{Deserialize, Serialize};

/// Default number of articles requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Default page number for a fresh session.
pub const DEFAULT_PAGE: u32 = 1;

/// Search and filter parameters for a news request.
///
/// Empty strings mean "unset". A non-empty `q` targets the full-text
/// search endpoint, which cannot be combined with `category` or
/// `country`; [`SearchParameters::normalize`] enforces that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameters {
    /// Free-text search query
    #[serde(default)]
    pub q: String,

    /// Category filter (e.g. "business", "sports")
    #[serde(default)]
    pub category: String,

    /// Two-letter country code filter (e.g. "us", "de")
    #[serde(default)]
    pub country: String,
}

impl SearchParameters {
    /// Create empty search parameters (no query, no filters)
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any search or filter value is set
    pub fn is_empty(&self) -> bool {
        self.q.is_empty() && self.category.is_empty() && self.country.is_empty()
    }

    /// Drop category/country when a free-text query is present.
    ///
    /// The search endpoint and the filtered-headlines endpoint are
    /// mutually exclusive upstream.
    pub fn normalize(&mut self) {
        if !self.q.is_empty() {
            self.category.clear();
            self.country.clear();
        }
    }
}

/// Partial update for [`SearchParameters`]: `None` fields keep their
/// current value.
#[derive(Debug, Clone, Default)]
pub struct SearchPatch {
    pub q: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
}

impl SearchPatch {
    /// Patch that touches nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text query
    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Set the category filter
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the country filter
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Patch that resets every field to unset
    pub fn clear_all() -> Self {
        Self {
            q: Some(String::new()),
            category: Some(String::new()),
            country: Some(String::new()),
        }
    }
}

/// Pagination parameters for a news request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParameters {
    /// Current page, 1-based
    pub page: u32,

    /// Articles per page, always positive
    pub page_size: u32,
}

impl Default for PaginationParameters {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Partial update for [`PaginationParameters`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationPatch {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PaginationPatch {
    /// Patch that touches nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Patch that resets pagination to the defaults
    pub fn reset() -> Self {
        Self {
            page: Some(DEFAULT_PAGE),
            page_size: Some(DEFAULT_PAGE_SIZE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let pagination = PaginationParameters::default();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.page_size, 20);

        let main = SearchParameters::default();
        assert!(main.is_empty());
    }

    #[test]
    fn test_normalize_drops_filters_for_query() {
        let mut params = SearchParameters {
            q: "rust".to_string(),
            category: "sports".to_string(),
            country: "us".to_string(),
        };
        params.normalize();
        assert_eq!(params.q, "rust");
        assert!(params.category.is_empty());
        assert!(params.country.is_empty());
    }

    #[test]
    fn test_normalize_keeps_filters_without_query() {
        let mut params = SearchParameters {
            q: String::new(),
            category: "sports".to_string(),
            country: "us".to_string(),
        };
        params.normalize();
        assert_eq!(params.category, "sports");
        assert_eq!(params.country, "us");
    }

    #[test]
    fn test_patch_builders() {
        let patch = SearchPatch::new().q("bitcoin").category("business");
        assert_eq!(patch.q, Some("bitcoin".to_string()));
        assert_eq!(patch.category, Some("business".to_string()));
        assert_eq!(patch.country, None);

        let patch = PaginationPatch::new().page(3);
        assert_eq!(patch.page, Some(3));
        assert_eq!(patch.page_size, None);
    }
}
