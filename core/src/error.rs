//! Typed failure taxonomy for the fetch pipeline
//!
//! Inner layers (retry, breaker) propagate `FetchError` values; the fetcher
//! is the outermost boundary and converts them into `ToolResponse` failures.
//! No `FetchError` ever crosses the tool boundary as a raised fault.

use thiserror::Error;

/// Status codes considered transient (worth retrying)
const TRANSIENT_STATUS: [u16; 6] = [408, 429, 500, 502, 503, 504];

/// Errors produced by a single fetch attempt or by the resilience layers
/// wrapping it
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The attempt exceeded its per-attempt deadline
    #[error("request timed out")]
    Timeout,

    /// Transport-level failure: connection refused, DNS, TLS, reset, ...
    #[error("network error: {0}")]
    Network(String),

    /// The upstream answered with a non-2xx status
    #[error("HTTP request failed with status {code}: {reason}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Canonical reason phrase (empty when unknown)
        reason: String,
    },

    /// The circuit breaker is open; no network attempt was made
    #[error("service temporarily unavailable (circuit breaker open)")]
    CircuitOpen,

    /// Last-resort classification for anything unanticipated
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl FetchError {
    /// Whether this failure is likely to succeed on retry.
    ///
    /// Timeouts and transport faults are always transient; status failures
    /// are transient only for 408/429 and the retryable 5xx family. Circuit
    /// rejections and unexpected faults are never retried.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout | Self::Network(_) => true,
            Self::Status { code, .. } => TRANSIENT_STATUS.contains(code),
            Self::CircuitOpen | Self::Unexpected(_) => false,
        }
    }

    /// The HTTP status code carried by this error, if any
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Classify a `reqwest` transport error.
    ///
    /// Timeouts map to [`FetchError::Timeout`]; request construction
    /// failures (malformed URL) to [`FetchError::Unexpected`]; everything
    /// else the HTTP stack reports (connect, reset, body read) to
    /// [`FetchError::Network`].
    #[must_use]
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_builder() {
            Self::Unexpected(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
