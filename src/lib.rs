//! # pagefeed
//!
//! A cursor-paginated listing loader: incremental page fetching driven by a
//! visibility-triggered load scheduler, with duplicate-request suppression
//! and stale-response discarding.
//!
//! ## Features
//!
//! - **Cursor Pagination**: opaque continuation tokens threaded through an
//!   explicit state machine, terminal-sentinel aware
//! - **Single-Flight Loads**: at most one fetch outstanding per listing, even
//!   under racing triggers
//! - **Visibility Trigger**: sentinel-visibility events converted to at most
//!   one load-more call per event, with back-pressure while a load is pending
//! - **Stale-Response Suppression**: a reset mid-flight discards the late
//!   response instead of resurrecting replaced data
//! - **Pluggable Fetchers**: bring any async page source via the
//!   `PageFetcher` trait or a pair of closures
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagefeed::{FnFetcher, ListingFeed, Page, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let fetcher = FnFetcher::new(
//!         || async { Ok(Page::new(vec!["a", "b"], Some("tok1"))) },
//!         |_cursor| async move { Ok(Page::last(vec!["c"])) },
//!     );
//!
//!     let mut feed = ListingFeed::new(fetcher);
//!     let sentinel = feed.mount().await;
//!
//!     // The embedding reports sentinel visibility as the user scrolls;
//!     // each report may drive one next-page load.
//!     sentinel.report_visible();
//!
//!     let snapshot = feed.snapshot().await;
//!     println!("{} items loaded", snapshot.items.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       ListingFeed                           │
//! │  mount() → Sentinel    snapshot() → FeedSnapshot            │
//! │  load_first_page()     unmount()                            │
//! └─────────────────────────────────────────────────────────────┘
//!            │                                 │
//! ┌──────────┴──────────────┐   ┌──────────────┴───────────────┐
//! │      CursorPager        │   │      VisibilityTrigger       │
//! ├─────────────────────────┤   ├──────────────────────────────┤
//! │ load_first_page         │◄──┤ attach / detach              │
//! │ load_next_page          │   │ pending guard                │
//! │ reset                   │   │ has_more / loading gating    │
//! └─────────────────────────┘   └──────────────────────────────┘
//!            │
//! ┌──────────┴──────────────┐
//! │      PageFetcher        │
//! │ fetch_first  fetch_next │
//! └─────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the loader
pub mod error;

/// Pages and opaque cursor tokens
pub mod page;

/// Fetch collaborator contract and closure adapter
pub mod fetch;

/// Cursor-pagination state machine
pub mod pager;

/// Visibility-triggered load scheduler
pub mod trigger;

/// Listing feed facade for embedding views
pub mod feed;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use feed::{FeedSnapshot, ListingFeed};
pub use fetch::{FnFetcher, PageFetcher};
pub use page::{Cursor, Page};
pub use pager::{CursorPager, ListingState, Phase};
pub use trigger::{
    Sentinel, SentinelEvent, TriggerGate, TriggerOptions, ViewportGeometry, VisibilityTrigger,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
