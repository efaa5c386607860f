mod gemini;

pub use gemini::{GeminiClient, DEFAULT_MODEL};

use thiserror::Error;

/// Failure modes of a single completion call. One attempt only; nothing
/// here is retried.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Network-layer failure: DNS, connect, timeout, reset, or an
    /// unreadable response body.
    #[error("completion transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    /// The endpoint answered with a non-success HTTP status.
    #[error("completion service returned {status}")]
    Service { status: reqwest::StatusCode },
}
