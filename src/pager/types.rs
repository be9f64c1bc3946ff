//! Pager state types
//!
//! Defines the listing phases and the state machine the cursor pager owns.
//! All transitions go through the methods here; the pager never mutates
//! fields directly, which keeps a single path for every state change.

use crate::page::{Cursor, Page};

/// Phase of a listing's load lifecycle
///
/// ```text
/// Idle → LoadingFirst → {Ready | Errored}
/// Ready → LoadingMore → {Ready | Ready + last_error}
/// any → Idle via reset()
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// No load has been requested yet, or the listing was reset
    #[default]
    Idle,
    /// The first page is being fetched
    LoadingFirst,
    /// At least one page resolved and no fetch is outstanding
    Ready,
    /// A next page is being fetched
    LoadingMore,
    /// The first page failed; there is nothing to show
    Errored,
}

impl Phase {
    /// Whether a fetch is currently outstanding in this phase
    pub fn is_load_in_flight(self) -> bool {
        matches!(self, Self::LoadingFirst | Self::LoadingMore)
    }
}

/// Authoritative state for one logical listing
///
/// Exclusively owned by one `CursorPager`; no external mutation happens
/// except through the pager's operations.
#[derive(Debug, Clone, Default)]
pub struct ListingState<T> {
    /// Items accumulated across pages, in page order then within-page order
    pub items: Vec<T>,
    /// Continuation cursor; `None` once the listing is exhausted (or before
    /// the first page resolves)
    pub cursor: Option<Cursor>,
    /// Current lifecycle phase
    pub phase: Phase,
    /// Message from the most recent failed load, if any
    pub last_error: Option<String>,
    /// Bumped by `reset` and each first-page load; an in-flight response is
    /// applied only if the generation it was issued under still matches
    generation: u64,
}

impl<T> ListingState<T> {
    /// Create a fresh, idle listing state
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
            phase: Phase::Idle,
            last_error: None,
            generation: 0,
        }
    }

    /// Current state generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a response issued under `generation` is no longer applicable
    pub fn is_stale(&self, generation: u64) -> bool {
        self.generation != generation
    }

    /// Whether further pages exist
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    /// Begin a first-page load: clear items and cursor eagerly, claim the
    /// `LoadingFirst` phase, and invalidate any response still in flight.
    ///
    /// Returns the generation the new fetch is issued under.
    pub fn begin_first_load(&mut self) -> u64 {
        self.generation += 1;
        self.items.clear();
        self.cursor = None;
        self.last_error = None;
        self.phase = Phase::LoadingFirst;
        self.generation
    }

    /// Apply a successful first page, replacing the item collection
    pub fn apply_first_page(&mut self, page: Page<T>) {
        self.cursor = page.continuation();
        self.items = page.items;
        self.last_error = None;
        self.phase = Phase::Ready;
    }

    /// Record a failed first-page load: nothing to show
    pub fn fail_first_load(&mut self, message: impl Into<String>) {
        self.items.clear();
        self.cursor = None;
        self.last_error = Some(message.into());
        self.phase = Phase::Errored;
    }

    /// Try to begin a next-page load.
    ///
    /// Returns `None` (the caller must treat this as a silent no-op, not an
    /// error) when a load is already in flight or no non-terminal cursor
    /// remains. Otherwise claims the `LoadingMore` phase and returns the
    /// issue generation plus the cursor to fetch with.
    pub fn try_begin_next_load(&mut self) -> Option<(u64, Cursor)> {
        if self.phase.is_load_in_flight() {
            return None;
        }
        let cursor = self.cursor.clone()?;
        self.last_error = None;
        self.phase = Phase::LoadingMore;
        Some((self.generation, cursor))
    }

    /// Apply a successful next page: order-preserving append, cursor
    /// replaced. No deduplication against prior items; page disjointness is
    /// the upstream cursor contract.
    pub fn apply_next_page(&mut self, page: Page<T>) {
        self.cursor = page.continuation();
        self.items.extend(page.items);
        self.last_error = None;
        self.phase = Phase::Ready;
    }

    /// Record a failed next-page load: earlier pages are preserved and the
    /// phase reverts to `Ready` so the caller may retry.
    pub fn fail_next_load(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
        self.phase = Phase::Ready;
    }

    /// Clear back to `Idle` and invalidate any in-flight response
    pub fn reset(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.cursor = None;
        self.last_error = None;
        self.phase = Phase::Idle;
    }
}
