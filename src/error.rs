//! Search error types.

use thiserror::Error;

/// Errors raised between compiling a request and receiving the engine's payload.
///
/// The infallible entry points on [`SearchService`](crate::search::SearchService)
/// absorb all of these into the empty result.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The endpoint URL could not be built.
    #[error("Invalid search endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport-level failure (connect, timeout, body read).
    #[error("Search request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The engine answered with a non-success status.
    #[error("Search engine returned status {status}")]
    Status { status: u16 },

    /// The response body was not valid JSON.
    #[error("Failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Any other failure reported by a search engine implementation.
    #[error("Search engine error: {0}")]
    Engine(String),
}
