//! Visibility-triggered load scheduler
//!
//! # Overview
//!
//! Converts "the sentinel entered the visible region" into at most one
//! load-more call per visibility event, with back-pressure while a load is
//! outstanding. The trigger knows nothing about pagination semantics; it is
//! a debounced visibility-to-callback bridge.
//!
//! The trigger is decoupled from any viewport API: the embedding renders a
//! [`Sentinel`] at the end of the list and reports intersection observations
//! to it, from whatever event source the platform offers (browser observer,
//! TUI scroll position, timer poll, an explicit "load more" button). The
//! [`TriggerOptions::observe`](crate::trigger::TriggerOptions::observe)
//! helper derives observations from raw scroll geometry.
//!
//! Two independent guards protect against duplicate-page requests from rapid
//! re-intersection or re-render churn: the trigger's pending flag here, and
//! the pager's phase check.

mod types;

pub use types::{SentinelEvent, TriggerOptions, ViewportGeometry};

use crate::pager::CursorPager;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Gating facts the trigger consults before invoking its callback
#[async_trait]
pub trait TriggerGate: Send + Sync {
    /// Whether further pages exist
    async fn has_more(&self) -> bool;

    /// Whether a load is currently outstanding
    async fn loading(&self) -> bool;
}

#[async_trait]
impl<T: Send + Sync + 'static> TriggerGate for CursorPager<T> {
    async fn has_more(&self) -> bool {
        CursorPager::has_more(self).await
    }

    async fn loading(&self) -> bool {
        self.is_load_in_flight().await
    }
}

/// Attachment point the embedding renders as the scroll sentinel.
///
/// Cheap to clone; reports never block. Reports sent after the trigger
/// detaches are dropped silently.
#[derive(Debug, Clone)]
pub struct Sentinel {
    tx: mpsc::UnboundedSender<SentinelEvent>,
}

impl Sentinel {
    /// Report a sentinel observation
    pub fn report(&self, event: SentinelEvent) {
        let _ = self.tx.send(event);
    }

    /// Report the sentinel as fully visible
    pub fn report_visible(&self) {
        self.report(SentinelEvent::visible());
    }

    /// Report the sentinel as outside the viewport
    pub fn report_hidden(&self) {
        self.report(SentinelEvent::hidden());
    }

    /// Whether a trigger is still observing this sentinel
    pub fn is_observed(&self) -> bool {
        !self.tx.is_closed()
    }

    /// A sentinel nothing observes; all reports go nowhere
    pub fn inert() -> Self {
        let (tx, _rx) = mpsc::unbounded_channel();
        Self { tx }
    }
}

type LoadMoreFn = dyn Fn() -> BoxFuture<'static, ()> + Send + Sync;

/// Converts sentinel visibility into gated load-more calls
pub struct VisibilityTrigger {
    options: TriggerOptions,
    worker: Option<JoinHandle<()>>,
}

impl VisibilityTrigger {
    /// Create a trigger with the given options
    pub fn new(options: TriggerOptions) -> Self {
        Self {
            options,
            worker: None,
        }
    }

    /// The configured options
    pub fn options(&self) -> TriggerOptions {
        self.options
    }

    /// Start observing a fresh sentinel, replacing any previous attachment.
    ///
    /// Returns the sentinel the embedding must render and report against.
    /// When `gate.has_more()` is already false the sentinel is returned
    /// inert and nothing is observed; the consumer re-attaches after state
    /// changes that could produce more pages.
    ///
    /// On each visibility event crossing the threshold, the event is dropped
    /// if a call is already pending, a load is outstanding, or no pages
    /// remain. Otherwise the pending flag is claimed and
    /// `on_threshold_crossed` runs to completion; the flag clears when the
    /// call finishes, even if it panics, so the guard cannot wedge the
    /// trigger.
    pub async fn attach<F>(&mut self, gate: Arc<dyn TriggerGate>, on_threshold_crossed: F) -> Sentinel
    where
        F: Fn() -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        self.detach();

        if !gate.has_more().await {
            debug!("sentinel not observed: listing already exhausted");
            return Sentinel::inert();
        }

        let (tx, mut rx) = mpsc::unbounded_channel::<SentinelEvent>();
        let options = self.options;
        let pending = Arc::new(AtomicBool::new(false));
        let callback: Arc<LoadMoreFn> = Arc::new(on_threshold_crossed);

        self.worker = Some(tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if !event.crosses(&options) {
                    continue;
                }
                if pending.load(Ordering::SeqCst) {
                    debug!("visibility signal dropped: call already pending");
                    continue;
                }
                if gate.loading().await {
                    debug!("visibility signal dropped: load outstanding");
                    continue;
                }
                if !gate.has_more().await {
                    debug!("visibility signal dropped: listing exhausted");
                    continue;
                }

                pending.store(true, Ordering::SeqCst);
                let guard = PendingGuard(Arc::clone(&pending));
                let load_more = callback();
                // Run the call in its own task so events arriving mid-load
                // are consumed now (and dropped by the pending flag) instead
                // of queueing up for replay after the load completes.
                tokio::spawn(async move {
                    let _guard = guard;
                    load_more.await;
                });
            }
        }));

        Sentinel { tx }
    }

    /// Stop observing. Must run whenever the sentinel changes or the
    /// consuming view goes away, on every exit path, so no callback fires
    /// against a torn-down view.
    pub fn detach(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }

    /// Whether a worker is currently observing a sentinel
    pub fn is_attached(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }
}

impl Default for VisibilityTrigger {
    fn default() -> Self {
        Self::new(TriggerOptions::default())
    }
}

impl Drop for VisibilityTrigger {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for VisibilityTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityTrigger")
            .field("options", &self.options)
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Clears the pending flag when the load-more call finishes, on every exit
/// path including panics.
struct PendingGuard(Arc<AtomicBool>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests;
