//! Cursor-pagination state machine
//!
//! # Overview
//!
//! `CursorPager` mediates all paging operations for one listing and
//! guarantees list integrity under repeated or concurrent triggers:
//!
//! - at most one fetch (first-page or next-page) is in flight per listing
//! - items accumulate append-only in server order, no deduplication
//! - a terminal cursor makes further next-page calls permanent no-ops
//! - a reset issued mid-flight discards the eventual response instead of
//!   resurrecting replaced data
//!
//! Failure semantics: collaborator failures are caught at the pager boundary
//! and converted to state fields, never propagated to the caller. A failed
//! first page empties the list; a failed next page preserves what already
//! loaded and leaves the cursor in place for a retry.

mod types;

pub use types::{ListingState, Phase};

use crate::fetch::PageFetcher;
use crate::page::Cursor;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Shared handle mediating paging operations for one listing
pub struct CursorPager<T> {
    /// Fetch collaborator supplied by the embedding
    fetcher: Arc<dyn PageFetcher<T>>,
    /// Listing state, exclusively owned by this pager
    state: Arc<RwLock<ListingState<T>>>,
}

impl<T: Send + Sync + 'static> CursorPager<T> {
    /// Create a pager bound to a fetch collaborator
    pub fn new(fetcher: impl PageFetcher<T> + 'static) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            state: Arc::new(RwLock::new(ListingState::new())),
        }
    }

    /// Load (or reload) the first page, replacing the item collection.
    ///
    /// Items and cursor are cleared eagerly and any in-flight response is
    /// invalidated before the fetch is issued. A failure is recorded as
    /// `Phase::Errored` with `last_error` set; it is not returned.
    pub async fn load_first_page(&self) {
        let generation = {
            let mut state = self.state.write().await;
            state.begin_first_load()
        };

        let result = self.fetcher.fetch_first().await;

        let mut state = self.state.write().await;
        if state.is_stale(generation) {
            debug!(generation, "discarding stale first-page response");
            return;
        }
        match result {
            Ok(page) => {
                debug!(items = page.len(), has_more = page.has_more(), "first page applied");
                state.apply_first_page(page);
            }
            Err(e) => {
                let message = e.state_message();
                warn!(error = %message, "first page load failed");
                state.fail_first_load(message);
            }
        }
    }

    /// Load the page after the current cursor and append it.
    ///
    /// A silent no-op when a load is already in flight or no non-terminal
    /// cursor remains; this is the guard against duplicate and racing
    /// triggers. A failure preserves the items loaded so far, reverts the
    /// phase to `Ready`, and records `last_error`; the cursor is unchanged
    /// so a later call retries the same page.
    pub async fn load_next_page(&self) {
        let Some((generation, cursor)) = self.state.write().await.try_begin_next_load() else {
            debug!("next page load skipped (in flight or exhausted)");
            return;
        };

        let result = self.fetcher.fetch_next(&cursor).await;

        let mut state = self.state.write().await;
        if state.is_stale(generation) {
            debug!(generation, "discarding stale next-page response");
            return;
        }
        match result {
            Ok(page) => {
                debug!(items = page.len(), has_more = page.has_more(), "next page appended");
                state.apply_next_page(page);
            }
            Err(e) => {
                let message = e.state_message();
                warn!(error = %message, "next page load failed");
                state.fail_next_load(message);
            }
        }
    }

    /// Clear back to `Idle`. Safe at any phase, including mid-flight: the
    /// in-flight response is discarded when it eventually resolves.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        debug!(phase = ?state.phase, "listing reset");
        state.reset();
    }

    /// Current lifecycle phase
    pub async fn phase(&self) -> Phase {
        self.state.read().await.phase
    }

    /// Whether further pages exist
    pub async fn has_more(&self) -> bool {
        self.state.read().await.has_more()
    }

    /// Whether any fetch is currently outstanding
    pub async fn is_load_in_flight(&self) -> bool {
        self.state.read().await.phase.is_load_in_flight()
    }

    /// The current continuation cursor, if any
    pub async fn cursor(&self) -> Option<Cursor> {
        self.state.read().await.cursor.clone()
    }

    /// Message from the most recent failed load, if any
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    /// A read guard over the listing state, for borrowing items without
    /// cloning
    pub async fn state(&self) -> tokio::sync::RwLockReadGuard<'_, ListingState<T>> {
        self.state.read().await
    }
}

impl<T: Clone + Send + Sync + 'static> CursorPager<T> {
    /// Clone of the accumulated items
    pub async fn items(&self) -> Vec<T> {
        self.state.read().await.items.clone()
    }
}

impl<T> Clone for CursorPager<T> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> std::fmt::Debug for CursorPager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorPager").finish_non_exhaustive()
    }
}
