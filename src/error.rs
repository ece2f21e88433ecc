//! Error types for the chat endpoint round trip.

use thiserror::Error;

/// Why a submission could not obtain a reply.
///
/// Every variant collapses into the same user-visible fallback message; the
/// distinction only shows up in logs.
#[derive(Error, Debug)]
pub enum ChatError {
    /// The request never produced a response (connect, TLS, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The body was not JSON or lacked a string `response` field.
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedBody(err.to_string())
    }
}

/// Result type alias for endpoint calls.
pub type Result<T> = std::result::Result<T, ChatError>;
