//! Fetch collaborator contract
//!
//! The loader consumes two collaborator operations supplied by the embedding
//! application: fetch the first page (no cursor exists yet) and fetch the
//! next page given a non-terminal cursor. Both must resolve with a `Page<T>`
//! or fail with an error carrying a human-readable message.
//!
//! The collaborator is stateless from the loader's perspective: it receives
//! a cursor and returns a page. Caching or memoization is the collaborator's
//! concern.

use crate::error::Result;
use crate::page::{Cursor, Page};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

/// Async source of listing pages
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    /// Fetch the first page of the listing
    async fn fetch_first(&self) -> Result<Page<T>>;

    /// Fetch the page following `cursor`
    async fn fetch_next(&self, cursor: &Cursor) -> Result<Page<T>>;
}

type FirstFn<T> = dyn Fn() -> BoxFuture<'static, Result<Page<T>>> + Send + Sync;
type NextFn<T> = dyn Fn(Cursor) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync;

/// `PageFetcher` built from a pair of closures.
///
/// For embeddings that don't want a named fetcher type:
///
/// ```rust,ignore
/// let fetcher = FnFetcher::new(
///     || async { Ok(Page::new(vec![1, 2], Some("tok1"))) },
///     |cursor| async move { Ok(Page::last(vec![3])) },
/// );
/// ```
pub struct FnFetcher<T> {
    first: Arc<FirstFn<T>>,
    next: Arc<NextFn<T>>,
}

impl<T> FnFetcher<T> {
    /// Create a fetcher from first-page and next-page closures
    pub fn new<F, FFut, N, NFut>(first: F, next: N) -> Self
    where
        F: Fn() -> FFut + Send + Sync + 'static,
        FFut: Future<Output = Result<Page<T>>> + Send + 'static,
        N: Fn(Cursor) -> NFut + Send + Sync + 'static,
        NFut: Future<Output = Result<Page<T>>> + Send + 'static,
    {
        Self {
            first: Arc::new(move || Box::pin(first())),
            next: Arc::new(move |cursor| Box::pin(next(cursor))),
        }
    }
}

impl<T> Clone for FnFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            first: Arc::clone(&self.first),
            next: Arc::clone(&self.next),
        }
    }
}

impl<T> std::fmt::Debug for FnFetcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnFetcher").finish_non_exhaustive()
    }
}

#[async_trait]
impl<T: Send + 'static> PageFetcher<T> for FnFetcher<T> {
    async fn fetch_first(&self) -> Result<Page<T>> {
        (self.first)().await
    }

    async fn fetch_next(&self, cursor: &Cursor) -> Result<Page<T>> {
        (self.next)(cursor.clone()).await
    }
}
