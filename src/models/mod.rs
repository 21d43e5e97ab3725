//! Core data models for articles and request parameters.

mod article;
mod params;

pub use article::{Article, FetchOutcome};
pub use params::{
    PaginationParameters, PaginationPatch, SearchParameters, SearchPatch, DEFAULT_PAGE,
    DEFAULT_PAGE_SIZE,
};
