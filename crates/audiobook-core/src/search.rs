//! Debounced search-as-you-type.
//!
//! Keystrokes restart a quiet-period timer; only the query still current when
//! the timer fires reaches the catalog. Each keystroke also bumps a
//! generation counter, and results are published only if their generation is
//! still the newest, so a slow response can never overwrite a newer one.

use crate::{Audiobook, Catalog, SearchQuery};

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, error, instrument};

/// Quiet period before a typed query is sent.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

const SEARCH_FAILED: &str = "Search failed";
const INITIAL_LISTING_FAILED: &str = "Failed to load initial audiobooks";

/// Snapshot rendered by a search screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Text currently in the search box.
    pub query: String,
    /// Latest accepted results. Kept as-is when a request fails.
    pub books: Vec<Audiobook>,
    /// A request for the current query is in flight.
    pub loading: bool,
    /// Inline message for the last failure, cleared on the next request.
    pub error: Option<String>,
}

pub(crate) struct Inner<C> {
    catalog: C,
    delay: Duration,
    generation: AtomicU64,
    state_tx: watch::Sender<SearchState>,
}

impl<C: Catalog> Inner<C> {
    pub(crate) fn new(catalog: C, delay: Duration) -> Self {
        let (state_tx, _) = watch::channel(SearchState::default());
        Self {
            catalog,
            delay,
            generation: AtomicU64::new(0),
            state_tx,
        }
    }

    /// Claim a new generation, superseding every earlier one.
    pub(crate) fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn snapshot(&self) -> SearchState {
        self.state_tx.borrow().clone()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    pub(crate) async fn run(
        &self,
        generation: u64,
        query: SearchQuery,
        failure_message: &'static str,
    ) {
        if !self.is_current(generation) {
            return;
        }

        self.state_tx.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let result = self.catalog.search(&query).await;

        if !self.is_current(generation) {
            debug!(generation, query = %query.query, "Discarding superseded results");
            return;
        }

        match result {
            Ok(books) => {
                debug!(generation, result_count = books.len(), "Search results published");
                self.state_tx.send_modify(|s| {
                    s.loading = false;
                    s.books = books;
                });
            }
            Err(e) => {
                error!(generation, query = %query.query, error = ?e, "Search failed");
                self.state_tx.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(failure_message.to_string());
                });
            }
        }
    }
}

/// Search box state machine over any [`Catalog`].
///
/// Must be driven from inside a tokio runtime: [`set_query`](Self::set_query)
/// spawns the timer task.
pub struct DebouncedSearch<C> {
    inner: Arc<Inner<C>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<C: Catalog + 'static> DebouncedSearch<C> {
    /// Debounce with the default 500ms quiet period.
    pub fn new(catalog: C) -> Self {
        Self::with_delay(catalog, SEARCH_DEBOUNCE)
    }

    /// Debounce with a custom quiet period.
    pub fn with_delay(catalog: C, delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner::new(catalog, delay)),
            pending: Mutex::new(None),
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.inner.state_tx.subscribe()
    }

    /// Current state.
    pub fn state(&self) -> SearchState {
        self.inner.snapshot()
    }

    /// Record new search-box text.
    ///
    /// Blank text loads the initial listing right away. Anything else is
    /// sent after the quiet period, unless another call supersedes it first.
    #[instrument(skip(self, query))]
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        let generation = self.inner.next_generation();
        let trimmed = query.trim().to_string();

        self.inner.state_tx.send_modify(|s| s.query = query);

        let inner = Arc::clone(&self.inner);
        let handle = if trimmed.is_empty() {
            tokio::spawn(async move {
                inner
                    .run(
                        generation,
                        SearchQuery::initial_listing(),
                        INITIAL_LISTING_FAILED,
                    )
                    .await;
            })
        } else {
            tokio::spawn(async move {
                tokio::time::sleep(inner.delay).await;
                inner
                    .run(generation, SearchQuery::new(trimmed), SEARCH_FAILED)
                    .await;
            })
        };

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }
}

impl<C> Drop for DebouncedSearch<C> {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}
