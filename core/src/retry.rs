//! Bounded retry with exponential backoff
//!
//! Wraps a single fetch attempt. Only transient failures (timeouts,
//! transport faults, 408/429/5xx) are retried; permanent failures terminate
//! immediately. A timed-out attempt consumes one attempt from the budget.
//! Backoff grows as `base * 2^(n-1)`, so a fully-failing call has a bounded,
//! predictable worst-case latency.

use crate::error::FetchError;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry configuration: total attempt budget and backoff base
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Total attempts, the initial one included
    pub max_attempts: u32,
    /// Delay before the first retry; doubled for each subsequent retry
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Backoff delay after the given 1-indexed attempt
    #[must_use]
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        self.backoff_base * 2_u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Run `operation` under the retry policy with a per-attempt deadline.
///
/// Each attempt is raced against `attempt_timeout`; exceeding it counts as a
/// transient [`FetchError::Timeout`]. The first success short-circuits; the
/// last observed error is returned once the budget is exhausted or a
/// permanent failure is seen.
///
/// # Errors
///
/// Returns the final [`FetchError`] when no attempt succeeded.
pub async fn execute_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    attempt_timeout: Duration,
    operation: F,
) -> Result<T, FetchError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut last_error = None;

    for attempt in 1..=policy.max_attempts {
        debug!(attempt, "issuing attempt");
        let outcome = match tokio::time::timeout(attempt_timeout, operation()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(FetchError::Timeout),
        };

        match outcome {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < policy.max_attempts => {
                let delay = policy.backoff_after(attempt);
                warn!(attempt, ?delay, error = %err, "transient failure, backing off");
                last_error = Some(err);
                tokio::time::sleep(delay).await;
            }
            Err(err) => {
                if err.is_transient() {
                    warn!(attempt, error = %err, "retry budget exhausted");
                } else {
                    debug!(attempt, error = %err, "permanent failure, not retrying");
                }
                return Err(err);
            }
        }
    }

    // Reachable only with a zero-attempt budget.
    Err(last_error.unwrap_or_else(|| FetchError::Unexpected("no attempt was made".to_string())))
}
