//! Pages and opaque cursor tokens
//!
//! A `Page<T>` is one fetch's worth of items plus the cursor for the next
//! page, or its absence, meaning end-of-listing.

use serde::{Deserialize, Serialize};

/// Opaque continuation token identifying where the next page begins.
///
/// The token value is supplied by the upstream data source and is
/// implementation-specific; the loader never inspects or constructs it,
/// only threads it through. An empty token is the terminal sentinel and
/// is normalized away when a page is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Create a cursor from an upstream token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for handing back to the upstream source
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this token is the terminal sentinel (empty value)
    pub fn is_terminal(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Cursor {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Cursor {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One fetched page of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in server order. The loader appends them verbatim: no
    /// reordering, no deduplication against earlier pages.
    pub items: Vec<T>,

    /// Cursor for the following page, absent when the listing is exhausted
    #[serde(default)]
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    /// Create a page with a continuation cursor
    pub fn new(items: Vec<T>, next_cursor: Option<impl Into<Cursor>>) -> Self {
        Self {
            items,
            next_cursor: next_cursor.map(Into::into),
        }
    }

    /// Create the final page of a listing
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    /// Create an empty terminal page
    pub fn empty() -> Self {
        Self::last(Vec::new())
    }

    /// Number of items in this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether further pages exist after this one.
    ///
    /// Both an absent cursor and an empty token mean "no more pages".
    pub fn has_more(&self) -> bool {
        self.next_cursor.as_ref().is_some_and(|c| !c.is_terminal())
    }

    /// The continuation cursor with the empty-token sentinel normalized
    /// to `None`
    pub fn continuation(&self) -> Option<Cursor> {
        self.next_cursor.clone().filter(|c| !c.is_terminal())
    }
}
