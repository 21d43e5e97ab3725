//! Fetch orchestration and command dispatch.
//!
//! The [`Reader`] owns the parameter store, the news source, and the
//! renderer. User actions arrive as typed [`Command`]s through a single
//! dispatcher; each one updates the store and triggers exactly one
//! fetch-and-render cycle. Fetch results are applied last-issued-wins:
//! every fetch carries a sequence number and completions that are no
//! longer the latest issued are discarded.

use crate::models::{FetchOutcome, PaginationParameters, PaginationPatch, SearchParameters, SearchPatch};
use crate::pagination::PaginationBar;
use crate::params::ParameterStore;
use crate::sources::{NewsSource, SourceError};
use crate::ui::Render;

/// Message shown when the API reports zero matching articles.
pub const EMPTY_RESULT_MESSAGE: &str =
    "Sorry. We can't find anything. Try to change your search options.";

/// Message shown when the fetch itself failed (network, bad body).
pub const TRANSPORT_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// A user action, produced by CLI flags or interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch with the current parameters (initial load)
    Refresh,

    /// Reset search parameters and pagination to defaults
    ClearFilters,

    /// Replace the search parameters; a non-empty `q` wins over the
    /// filters (the store enforces exclusivity). Resets to page 1.
    ApplyFilters {
        q: String,
        category: String,
        country: String,
    },

    /// Navigate to the given page
    ChangePage(u32),
}

/// Where the last fetch-and-render cycle left the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing fetched yet
    Idle,
    /// Article list on screen
    Rendered,
    /// "No results" message on screen
    Empty,
    /// Error message on screen
    Errored,
}

/// Handle for one issued fetch, used to apply its result later.
///
/// Carries the parameters snapshotted at issue time so an overlapping
/// mutation cannot change what the in-flight request meant.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    seq: u64,
    main: SearchParameters,
    pagination: PaginationParameters,
}

impl FetchTicket {
    /// Search parameters snapshotted when the fetch was issued.
    pub fn main(&self) -> &SearchParameters {
        &self.main
    }

    /// Pagination parameters snapshotted when the fetch was issued.
    pub fn pagination(&self) -> &PaginationParameters {
        &self.pagination
    }
}

/// News reader orchestrator.
pub struct Reader<S, R> {
    store: ParameterStore,
    source: S,
    renderer: R,
    issued: u64,
    view: ViewState,
    pagination: Option<PaginationBar>,
}

impl<S: NewsSource, R: Render> Reader<S, R> {
    /// Create a reader over an initialized parameter store.
    pub fn new(store: ParameterStore, source: S, renderer: R) -> Self {
        Self {
            store,
            source,
            renderer,
            issued: 0,
            view: ViewState::Idle,
            pagination: None,
        }
    }

    /// Current parameters.
    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    /// The news source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Where the last cycle left the view.
    pub fn view(&self) -> ViewState {
        self.view
    }

    /// The pagination bar for the current view, when one is shown.
    pub fn pagination(&self) -> Option<&PaginationBar> {
        self.pagination.as_ref()
    }

    /// Apply a command: update the store, then fetch and render.
    pub async fn dispatch(&mut self, command: Command) {
        self.apply_command(&command);
        self.fetch_and_render().await;
    }

    /// Update the store for a command without fetching. Callers that
    /// drive the fetch themselves (spinner, overlap tests) follow up
    /// with [`begin_fetch`](Self::begin_fetch)/[`apply_result`](Self::apply_result).
    pub fn apply_command(&mut self, command: &Command) {
        tracing::debug!(?command, "dispatching command");
        match command {
            Command::Refresh => {}
            Command::ClearFilters => {
                self.store.set_main(SearchPatch::clear_all());
                self.store.set_pagination(PaginationPatch::reset());
            }
            Command::ApplyFilters {
                q,
                category,
                country,
            } => {
                self.store.set_main(SearchPatch {
                    q: Some(q.clone()),
                    category: Some(category.clone()),
                    country: Some(country.clone()),
                });
                self.store.set_pagination(PaginationPatch::new().page(1));
            }
            Command::ChangePage(page) => {
                self.store
                    .set_pagination(PaginationPatch::new().page(*page));
            }
        }
    }

    /// One fetch-and-render cycle. Never fails: every outcome,
    /// including transport failure, lands the view in a terminal state.
    pub async fn fetch_and_render(&mut self) {
        let ticket = self.begin_fetch();
        let result = self.source.fetch(&ticket.main, &ticket.pagination).await;
        self.apply_result(ticket, result);
    }

    /// Issue a fetch ticket, snapshotting the current parameters.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket {
            seq: self.issued,
            main: self.store.main().clone(),
            pagination: *self.store.pagination(),
        }
    }

    /// Apply a completed fetch. Results from a ticket that is no longer
    /// the latest issued are dropped so the newest request wins
    /// regardless of completion order.
    pub fn apply_result(&mut self, ticket: FetchTicket, result: Result<FetchOutcome, SourceError>) {
        if ticket.seq != self.issued {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.issued,
                "discarding stale fetch result"
            );
            return;
        }

        match result {
            Ok(FetchOutcome::Success {
                total_results,
                articles,
            }) if total_results > 0 => {
                self.renderer.draw_news_list(&articles);
                self.renderer.scroll_to_top();

                self.pagination = if total_results > ticket.pagination.page_size {
                    match PaginationBar::new(
                        total_results,
                        ticket.pagination.page_size,
                        ticket.pagination.page,
                    ) {
                        Ok(bar) if !bar.is_hidden() => Some(bar),
                        Ok(_) => None,
                        Err(err) => {
                            tracing::warn!(error = %err, "pagination disabled");
                            None
                        }
                    }
                } else {
                    None
                };
                self.renderer.draw_pagination(self.pagination.as_ref());
                self.view = ViewState::Rendered;
            }

            Ok(FetchOutcome::Success { .. }) => {
                self.renderer.draw_error(EMPTY_RESULT_MESSAGE);
                self.hide_pagination();
                self.view = ViewState::Empty;
            }

            Ok(FetchOutcome::ApiError { message }) => {
                self.renderer.draw_error(&message);
                self.hide_pagination();
                self.view = ViewState::Errored;
            }

            Err(err) => {
                tracing::error!(error = %err, "news fetch failed");
                self.renderer.draw_error(TRANSPORT_ERROR_MESSAGE);
                self.hide_pagination();
                self.view = ViewState::Errored;
            }
        }
    }

    fn hide_pagination(&mut self) {
        self.pagination = None;
        self.renderer.draw_pagination(None);
    }
}
