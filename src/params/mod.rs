//! Parameter store synchronized with a canonical query string.
//!
//! The store owns the current search/filter/pagination state and keeps
//! a canonical query-string rendition of it, the way a browser reader
//! keeps its state in the page URL. Mutations replace the string, they
//! never stack a history.

use url::form_urlencoded;

use crate::models::{
    PaginationParameters, PaginationPatch, SearchParameters, SearchPatch, DEFAULT_PAGE,
    DEFAULT_PAGE_SIZE,
};

/// Query-string keys recognized at load; anything else is ignored.
const KEY_QUERY: &str = "q";
const KEY_CATEGORY: &str = "category";
const KEY_COUNTRY: &str = "country";
const KEY_PAGE: &str = "page";
const KEY_PAGE_SIZE: &str = "pageSize";

/// Holds request parameters and their canonical query-string form.
///
/// Main keys with empty values are omitted from the string to keep it
/// canonical; `page` and `pageSize` are always written since pagination
/// state must stay explicit once requests are flowing.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    main: SearchParameters,
    pagination: PaginationParameters,
    query: String,
}

impl ParameterStore {
    /// Store with default parameters.
    pub fn new() -> Self {
        Self::from_parts(SearchParameters::default(), PaginationParameters::default())
    }

    /// Initialize from a query string (e.g. `q=rust&page=3`).
    ///
    /// Unrecognized keys are ignored; missing or unparsable values fall
    /// back to the documented defaults.
    pub fn from_query(query: &str) -> Self {
        let mut main = SearchParameters::default();
        let mut pagination = PaginationParameters::default();

        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                KEY_QUERY => main.q = value.into_owned(),
                KEY_CATEGORY => main.category = value.into_owned(),
                KEY_COUNTRY => main.country = value.into_owned(),
                KEY_PAGE => {
                    if let Ok(page) = value.parse::<u32>() {
                        pagination.page = page.max(DEFAULT_PAGE);
                    }
                }
                KEY_PAGE_SIZE => {
                    if let Ok(size) = value.parse::<u32>() {
                        if size > 0 {
                            pagination.page_size = size;
                        }
                    }
                }
                _ => {}
            }
        }

        Self::from_parts(main, pagination)
    }

    fn from_parts(mut main: SearchParameters, pagination: PaginationParameters) -> Self {
        main.normalize();
        let mut store = Self {
            main,
            pagination,
            query: String::new(),
        };
        store.rewrite_query();
        store
    }

    /// Current search/filter parameters
    pub fn main(&self) -> &SearchParameters {
        &self.main
    }

    /// Current pagination parameters
    pub fn pagination(&self) -> &PaginationParameters {
        &self.pagination
    }

    /// The canonical query string for the current state
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Merge the given fields into the search parameters and rewrite
    /// the query string. A non-empty `q` forces `category`/`country`
    /// to empty (upstream endpoints are mutually exclusive).
    pub fn set_main(&mut self, patch: SearchPatch) {
        if let Some(q) = patch.q {
            self.main.q = q;
        }
        if let Some(category) = patch.category {
            self.main.category = category;
        }
        if let Some(country) = patch.country {
            self.main.country = country;
        }
        self.main.normalize();
        self.rewrite_query();
    }

    /// Merge the given fields into the pagination parameters and
    /// rewrite the query string. A zero `page_size` is ignored.
    pub fn set_pagination(&mut self, patch: PaginationPatch) {
        if let Some(page) = patch.page {
            self.pagination.page = page.max(DEFAULT_PAGE);
        }
        if let Some(page_size) = patch.page_size {
            if page_size > 0 {
                self.pagination.page_size = page_size;
            }
        }
        self.rewrite_query();
    }

    /// Serialize the full state back into the canonical query string.
    fn rewrite_query(&mut self) {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        if !self.main.q.is_empty() {
            serializer.append_pair(KEY_QUERY, &self.main.q);
        }
        if !self.main.category.is_empty() {
            serializer.append_pair(KEY_CATEGORY, &self.main.category);
        }
        if !self.main.country.is_empty() {
            serializer.append_pair(KEY_COUNTRY, &self.main.country);
        }
        serializer.append_pair(KEY_PAGE, &self.pagination.page.to_string());
        serializer.append_pair(KEY_PAGE_SIZE, &self.pagination.page_size.to_string());

        self.query = serializer.finish();
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_store_defaults() {
        let store = ParameterStore::new();
        assert!(store.main().is_empty());
        assert_eq!(store.pagination().page, 1);
        assert_eq!(store.pagination().page_size, 20);
        assert_eq!(store.query(), "page=1&pageSize=20");
    }

    #[test]
    fn test_from_query_recognized_keys() {
        let store = ParameterStore::from_query("q=rust&page=3&pageSize=50");
        assert_eq!(store.main().q, "rust");
        assert_eq!(store.pagination().page, 3);
        assert_eq!(store.pagination().page_size, 50);
    }

    #[test]
    fn test_from_query_ignores_unknown_keys() {
        let store = ParameterStore::from_query("utm_source=feed&category=science&junk=1");
        assert_eq!(store.main().category, "science");
        assert_eq!(store.pagination().page, 1);
    }

    #[test]
    fn test_from_query_bad_numbers_fall_back() {
        let store = ParameterStore::from_query("page=abc&pageSize=0");
        assert_eq!(store.pagination().page, 1);
        assert_eq!(store.pagination().page_size, 20);
    }

    #[test]
    fn test_set_main_round_trip() {
        let mut store = ParameterStore::new();
        store.set_main(SearchPatch::new().q("x"));
        assert_eq!(store.main().q, "x");

        let reloaded = ParameterStore::from_query(store.query());
        assert_eq!(reloaded.main(), store.main());
        assert_eq!(reloaded.pagination(), store.pagination());
    }

    #[test]
    fn test_set_main_forces_exclusivity() {
        let mut store = ParameterStore::new();
        store.set_main(SearchPatch::new().q("foo").category("sports"));
        assert_eq!(store.main().q, "foo");
        assert!(store.main().category.is_empty());
        assert!(store.main().country.is_empty());
    }

    #[test]
    fn test_empty_main_keys_omitted() {
        let mut store = ParameterStore::new();
        store.set_main(SearchPatch::new().category("business").country("us"));
        assert_eq!(store.query(), "category=business&country=us&page=1&pageSize=20");

        store.set_main(SearchPatch::clear_all());
        assert_eq!(store.query(), "page=1&pageSize=20");
    }

    #[test]
    fn test_set_pagination_always_written() {
        let mut store = ParameterStore::new();
        store.set_pagination(PaginationPatch::new().page(4));
        assert_eq!(store.query(), "page=4&pageSize=20");

        store.set_pagination(PaginationPatch::reset());
        assert_eq!(store.query(), "page=1&pageSize=20");
    }

    #[test]
    fn test_query_values_are_encoded() {
        let mut store = ParameterStore::new();
        store.set_main(SearchPatch::new().q("climate change"));
        assert_eq!(store.query(), "q=climate+change&page=1&pageSize=20");

        let reloaded = ParameterStore::from_query(store.query());
        assert_eq!(reloaded.main().q, "climate change");
    }
}
