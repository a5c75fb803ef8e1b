//! Index adapter error types.

use thiserror::Error;

/// Errors that can occur when talking to the search cluster.
#[derive(Debug, Error)]
pub enum IndexError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The cluster returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the cluster.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a cluster response or a stored document.
    #[error("parse error: {0}")]
    Parse(String),

    /// No cluster URL is configured.
    #[error("operate log index is not configured")]
    NotConfigured,

    /// The adapter only serves operate logs.
    #[error("unsupported record kind for the index: {0}")]
    UnsupportedKind(String),
}
