//! Listing feed facade
//!
//! Wires a [`CursorPager`] and a [`VisibilityTrigger`] into the surface an
//! embedding view consumes: mount loads the first page and returns the
//! sentinel to render at the end of the list; reported visibility drives
//! next-page loads; snapshots expose read-only state for rendering.

use crate::fetch::PageFetcher;
use crate::pager::{CursorPager, Phase};
use crate::trigger::{Sentinel, TriggerOptions, VisibilityTrigger};
use futures::FutureExt;
use std::sync::Arc;

/// Read-only state snapshot for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSnapshot<T> {
    /// Items accumulated so far, in page order
    pub items: Vec<T>,
    /// Whether the first page is being fetched (nothing to show yet)
    pub loading: bool,
    /// Whether a next page is being fetched (list stays visible)
    pub load_more_loading: bool,
    /// Message from the most recent failed load, if any
    pub load_error: Option<String>,
}

/// One listing view's loader: pager, trigger, and current sentinel
pub struct ListingFeed<T> {
    pager: CursorPager<T>,
    trigger: VisibilityTrigger,
    sentinel: Sentinel,
}

impl<T: Clone + Send + Sync + 'static> ListingFeed<T> {
    /// Create a feed with default trigger options
    pub fn new(fetcher: impl PageFetcher<T> + 'static) -> Self {
        Self::with_options(fetcher, TriggerOptions::default())
    }

    /// Create a feed with explicit trigger options
    pub fn with_options(fetcher: impl PageFetcher<T> + 'static, options: TriggerOptions) -> Self {
        Self {
            pager: CursorPager::new(fetcher),
            trigger: VisibilityTrigger::new(options),
            sentinel: Sentinel::inert(),
        }
    }

    /// Load the first page and arm the scroll trigger.
    ///
    /// Returns the sentinel the view must render at the end of the list and
    /// report visibility against.
    pub async fn mount(&mut self) -> Sentinel {
        self.load_first_page().await
    }

    /// Reload from the top: the item collection is replaced, any in-flight
    /// response is discarded, and the trigger is re-armed with a fresh
    /// sentinel (the previous one stops being observed).
    pub async fn load_first_page(&mut self) -> Sentinel {
        self.pager.load_first_page().await;
        self.arm().await
    }

    /// The pager handle, for driving loads directly (an explicit "load
    /// more" control instead of, or alongside, the scroll sentinel)
    pub fn pager(&self) -> &CursorPager<T> {
        &self.pager
    }

    /// The sentinel currently observed; inert before mount or after unmount
    pub fn sentinel(&self) -> Sentinel {
        self.sentinel.clone()
    }

    /// Snapshot of the listing state for rendering
    pub async fn snapshot(&self) -> FeedSnapshot<T> {
        let state = self.pager.state().await;
        FeedSnapshot {
            items: state.items.clone(),
            loading: state.phase == Phase::LoadingFirst,
            load_more_loading: state.phase == Phase::LoadingMore,
            load_error: state.last_error.clone(),
        }
    }

    /// Tear the view down: stop observing the sentinel and discard the
    /// listing state, including any response still in flight.
    pub async fn unmount(&mut self) {
        self.trigger.detach();
        self.sentinel = Sentinel::inert();
        self.pager.reset().await;
    }

    async fn arm(&mut self) -> Sentinel {
        let pager = self.pager.clone();
        let sentinel = self
            .trigger
            .attach(Arc::new(self.pager.clone()), move || {
                let pager = pager.clone();
                async move { pager.load_next_page().await }.boxed()
            })
            .await;
        self.sentinel = sentinel.clone();
        sentinel
    }
}

impl<T> std::fmt::Debug for ListingFeed<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingFeed")
            .field("trigger", &self.trigger)
            .finish_non_exhaustive()
    }
}
