//! Error types for pagefeed
//!
//! This module defines the error hierarchy for the loader.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for pagefeed
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Page Load Errors
    // ============================================================================
    /// The first page could not be loaded; there is nothing to show
    #[error("First page load failed: {message}")]
    FirstPage {
        /// Human-readable reason
        message: String,
    },

    /// A next page could not be loaded; earlier pages are retained
    #[error("Next page load failed: {message}")]
    NextPage {
        /// Human-readable reason
        message: String,
    },

    // ============================================================================
    // Collaborator Errors
    // ============================================================================
    /// The fetch collaborator failed (transport, upstream, anything)
    #[error("Fetch failed: {message}")]
    Fetch {
        /// Human-readable reason
        message: String,
    },

    /// A page body could not be deserialized
    #[error("Failed to decode page: {0}")]
    Decode(#[from] serde_json::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Catch-all with a preformatted message
    #[error("{0}")]
    Other(String),

    /// Error from a collaborator using anyhow internally
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a first-page error
    pub fn first_page(message: impl Into<String>) -> Self {
        Self::FirstPage {
            message: message.into(),
        }
    }

    /// Create a next-page error
    pub fn next_page(message: impl Into<String>) -> Self {
        Self::NextPage {
            message: message.into(),
        }
    }

    /// Create a fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Render the error as the message stored in listing state.
    ///
    /// Collaborator failures surface to embedding views as plain strings,
    /// never as error values.
    pub fn state_message(&self) -> String {
        match self {
            Self::FirstPage { message } | Self::NextPage { message } | Self::Fetch { message } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for pagefeed
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
