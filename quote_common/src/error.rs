//! Error types shared between the quote service and the requester.
//!
//! The `QuoteError` enum covers every failure that can happen along the
//! fetch/persist/respond chain. Timeouts get their own variant at every hop so
//! callers can log and react to them separately from other transport failures.
use std::io;
use std::time::Duration;

use thiserror::Error;

/// Unified error type shared by the server and the client.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// A deadline expired before the bounded operation completed.
    #[error("Deadline of {budget:?} exceeded")]
    Timeout {
        /// Budget the expired deadline was derived from.
        budget: Duration,
    },

    /// A remote peer answered with a non-success status code.
    #[error("Peer returned status {code}: {body}")]
    UpstreamStatus {
        /// HTTP status code.
        code: u16,
        /// Response body, kept for diagnostics only.
        body: String,
    },

    /// Response body does not match the expected schema.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Persistence failed for a reason other than a timeout.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Low-level connection failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed address or URL in the configuration.
    #[error("Invalid address: {0}")]
    Address(String),
}

impl QuoteError {
    /// Returns `true` if the error is a deadline expiry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, QuoteError::Timeout { .. })
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::Decode(err.to_string())
    }
}
