//! Uniform fetch result and response normalization
//!
//! Every tool sees upstream outcomes as a [`ToolResponse`] value:
//! - 2xx with a JSON body → success with a parsed value
//! - 2xx with a non-JSON body (RSS/XML feeds, plain text, empty) → success
//!   with the raw body only; this is explicitly NOT an error
//! - everything else → failure with a message and an optional status code
//!
//! A response is constructed once per physical HTTP outcome and never
//! mutated afterwards; the cache and callers share clones freely.

use crate::error::FetchError;
use serde::de::DeserializeOwned;

/// The outcome half of a [`ToolResponse`]: success or failure, never both
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Upstream answered 2xx
    Success {
        /// Raw response body, preserved verbatim
        body: String,
        /// Body parsed as JSON, when it was valid JSON
        json: Option<serde_json::Value>,
    },
    /// The request could not be completed
    Failure {
        /// Human-readable description of what went wrong
        message: String,
        /// HTTP status code, when the failure carried one
        status: Option<u16>,
    },
}

/// Normalized result of a resilient fetch
#[derive(Clone, Debug, PartialEq)]
pub struct ToolResponse {
    url: String,
    outcome: Outcome,
}

impl ToolResponse {
    /// Build a success from a 2xx body, parsing JSON best-effort.
    ///
    /// A body that is not valid JSON (or is empty) still yields a success;
    /// only the parsed value is absent.
    #[must_use]
    pub fn success(url: impl Into<String>, body: impl Into<String>) -> Self {
        let body = body.into();
        let json = serde_json::from_str(&body).ok();
        Self {
            url: url.into(),
            outcome: Outcome::Success { body, json },
        }
    }

    /// Build a failure with a message and an optional status code
    #[must_use]
    pub fn failure(
        url: impl Into<String>,
        message: impl Into<String>,
        status: Option<u16>,
    ) -> Self {
        Self {
            url: url.into(),
            outcome: Outcome::Failure {
                message: message.into(),
                status,
            },
        }
    }

    /// Convert an exhausted pipeline error into a failure response.
    ///
    /// This is the outermost fault boundary: every error class the pipeline
    /// can produce maps to a value here, so no fault crosses into tool code.
    #[must_use]
    pub fn from_error(url: impl Into<String>, err: &FetchError) -> Self {
        let message = match err {
            FetchError::Timeout => "Request timed out after multiple attempts".to_string(),
            FetchError::Network(detail) => format!("Network error: {detail}"),
            FetchError::Status { code, reason } => {
                format!("HTTP request failed with status {code}: {reason}")
            }
            FetchError::CircuitOpen => {
                "service temporarily unavailable (circuit breaker open)".to_string()
            }
            FetchError::Unexpected(detail) => format!("Unexpected error: {detail}"),
        };
        Self::failure(url, message, err.status_code())
    }

    /// The exact request URL this response answers (also the cache key)
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The success/failure outcome
    #[must_use]
    pub const fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Whether the fetch succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    /// Raw body text for successes, `None` for failures
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success { body, .. } => Some(body),
            Outcome::Failure { .. } => None,
        }
    }

    /// Parsed JSON value, when the body was valid JSON
    #[must_use]
    pub const fn json(&self) -> Option<&serde_json::Value> {
        match &self.outcome {
            Outcome::Success { json, .. } => json.as_ref(),
            Outcome::Failure { .. } => None,
        }
    }

    /// Error message for failures, `None` for successes
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success { .. } => None,
            Outcome::Failure { message, .. } => Some(message),
        }
    }

    /// HTTP status code attached to a failure, when one was observed
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match &self.outcome {
            Outcome::Success { .. } => None,
            Outcome::Failure { status, .. } => *status,
        }
    }

    /// Best-effort typed materialization of the JSON payload.
    ///
    /// Returns `None` when the response is a failure, carries no JSON, or
    /// the JSON does not match the requested shape. Never errors.
    #[must_use]
    pub fn parse<T: DeserializeOwned>(&self) -> Option<T> {
        self.json()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        value: i64,
    }

    #[test]
    fn test_success_with_json_body() {
        let response = ToolResponse::success("https://x/data", r#"{"value":42}"#);
        assert!(response.is_success());
        assert_eq!(response.body(), Some(r#"{"value":42}"#));
        assert_eq!(response.json().and_then(|v| v["value"].as_i64()), Some(42));
        assert_eq!(response.error_message(), None);
        assert_eq!(response.status(), None);
    }

    #[test]
    fn test_success_with_non_json_body() {
        let response = ToolResponse::success("https://x/feed", "<rss></rss>");
        assert!(response.is_success());
        assert_eq!(response.body(), Some("<rss></rss>"));
        assert!(response.json().is_none());
    }

    #[test]
    fn test_success_with_empty_body() {
        let response = ToolResponse::success("https://x/empty", "");
        assert!(response.is_success());
        assert_eq!(response.body(), Some(""));
        assert!(response.json().is_none());
    }

    #[test]
    fn test_failure_carries_message_and_status() {
        let response = ToolResponse::failure("https://x/missing", "HTTP request failed", Some(404));
        assert!(!response.is_success());
        assert_eq!(response.body(), None);
        assert_eq!(response.error_message(), Some("HTTP request failed"));
        assert_eq!(response.status(), Some(404));
    }

    #[test]
    fn test_from_error_status() {
        let err = FetchError::Status {
            code: 503,
            reason: "Service Unavailable".to_string(),
        };
        let response = ToolResponse::from_error("https://x/api", &err);
        assert_eq!(
            response.error_message(),
            Some("HTTP request failed with status 503: Service Unavailable")
        );
        assert_eq!(response.status(), Some(503));
    }

    #[test]
    fn test_from_error_timeout() {
        let response = ToolResponse::from_error("https://x/slow", &FetchError::Timeout);
        assert_eq!(
            response.error_message(),
            Some("Request timed out after multiple attempts")
        );
        assert_eq!(response.status(), None);
    }

    #[test]
    fn test_from_error_circuit_open() {
        let response = ToolResponse::from_error("https://x/api", &FetchError::CircuitOpen);
        assert_eq!(
            response.error_message(),
            Some("service temporarily unavailable (circuit breaker open)")
        );
    }

    #[test]
    fn test_typed_materialization() {
        let response = ToolResponse::success("https://x/data", r#"{"value":42}"#);
        assert_eq!(response.parse::<Payload>(), Some(Payload { value: 42 }));
    }

    #[test]
    fn test_typed_materialization_shape_mismatch_returns_none() {
        let response = ToolResponse::success("https://x/data", r#"{"other":"field"}"#);
        assert_eq!(response.parse::<Payload>(), None);
    }

    #[test]
    fn test_typed_materialization_from_non_json_returns_none() {
        let response = ToolResponse::success("https://x/feed", "<rss></rss>");
        assert_eq!(response.parse::<Payload>(), None);
    }
}
