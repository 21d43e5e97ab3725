//! Mock source for testing purposes.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::{Article, FetchOutcome, PaginationParameters, SearchParameters};
use crate::sources::{NewsSource, SourceError};

/// A mock source that replays queued responses.
///
/// Each fetch pops the next queued response; with the queue empty it
/// answers an empty success. Received parameters are recorded for
/// assertions.
#[derive(Debug, Default)]
pub struct MockSource {
    responses: Mutex<VecDeque<Result<FetchOutcome, SourceError>>>,
    requests: Mutex<Vec<(SearchParameters, PaginationParameters)>>,
}

impl MockSource {
    /// Create a mock with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome for a future fetch.
    pub fn push_outcome(&self, outcome: FetchOutcome) {
        self.responses.lock().unwrap().push_back(Ok(outcome));
    }

    /// Queue a transport failure for a future fetch.
    pub fn push_error(&self, error: SourceError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Parameters seen so far, in call order.
    pub fn requests(&self) -> Vec<(SearchParameters, PaginationParameters)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl NewsSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn fetch(
        &self,
        main: &SearchParameters,
        pagination: &PaginationParameters,
    ) -> Result<FetchOutcome, SourceError> {
        self.requests
            .lock()
            .unwrap()
            .push((main.clone(), *pagination));

        match self.responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(FetchOutcome::success(0, Vec::new())),
        }
    }
}

/// Helper to create a numbered article for tests.
pub fn make_article(n: u32) -> Article {
    Article::new(
        format!("https://example.com/{}", n),
        format!("Article {}", n),
        "Example News",
    )
}

/// Helper to create `count` numbered articles for tests.
pub fn make_articles(count: u32) -> Vec<Article> {
    (1..=count).map(make_article).collect()
}
