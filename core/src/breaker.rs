//! Circuit breaker shared across all calls through one fetcher
//!
//! Sheds load from an upstream that keeps failing: after a threshold of
//! consecutive transient-class failures the circuit opens and calls fail
//! fast without touching the network. Once the cooldown elapses a single
//! probe is let through; its outcome decides between closing the circuit
//! and restarting the cooldown.
//!
//! The mutex guards state transitions only; it is never held across I/O.

use crate::error::FetchError;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Breaker state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CircuitState {
    /// Normal operation; calls pass through
    Closed,
    /// Failing fast until the cooldown instant
    Open {
        /// When the cooldown elapses and a probe may be admitted
        until: Instant,
    },
    /// A single probe call is in flight
    HalfOpen,
}

struct BreakerInner {
    state: CircuitState,
    consecutive_failures: u32,
}

/// Consecutive-failure circuit breaker
pub struct CircuitBreaker {
    inner: Mutex<BreakerInner>,
    threshold: u32,
    cooldown: Duration,
}

impl CircuitBreaker {
    /// Create a closed breaker that opens after `threshold` consecutive
    /// failures and stays open for `cooldown`
    #[must_use]
    pub const fn new(threshold: u32, cooldown: Duration) -> Self {
        Self {
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                consecutive_failures: 0,
            }),
            threshold,
            cooldown,
        }
    }

    /// Decide whether a call may proceed.
    ///
    /// While open, returns [`FetchError::CircuitOpen`] until the cooldown
    /// elapses; the first call after that is admitted as the half-open
    /// probe, and further calls are rejected until the probe resolves.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::CircuitOpen`] when the call must fail fast.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[allow(clippy::expect_used)]
    pub fn admit(&self) -> Result<(), FetchError> {
        let mut inner = self.inner.lock().expect("circuit breaker lock poisoned");
        match inner.state {
            CircuitState::Closed => Ok(()),
            CircuitState::Open { until } => {
                if Instant::now() >= until {
                    info!("circuit breaker cooldown elapsed, admitting probe");
                    inner.state = CircuitState::HalfOpen;
                    Ok(())
                } else {
                    Err(FetchError::CircuitOpen)
                }
            }
            CircuitState::HalfOpen => Err(FetchError::CircuitOpen),
        }
    }

    /// Record a successful call: closes the circuit and resets the counter.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[allow(clippy::expect_used)]
    pub fn record_success(&self) {
        let mut inner = self.inner.lock().expect("circuit breaker lock poisoned");
        if inner.state != CircuitState::Closed {
            info!("circuit breaker closed");
        }
        inner.state = CircuitState::Closed;
        inner.consecutive_failures = 0;
    }

    /// Record a failed call, evaluated at the retry-exhausted level.
    ///
    /// In `Closed`, only transient-class failures count toward the trip
    /// threshold; permanent failures (plain 4xx) neither increment nor
    /// reset the counter, mirroring a resilience pipeline's
    /// handled-outcomes rule. A half-open probe failure of *any* class
    /// re-opens the circuit with a fresh cooldown — the state must always
    /// resolve, or the breaker would wedge in `HalfOpen`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[allow(clippy::expect_used)]
    pub fn record_failure(&self, err: &FetchError) {
        let mut inner = self.inner.lock().expect("circuit breaker lock poisoned");
        if err.is_transient() {
            inner.consecutive_failures = inner.consecutive_failures.saturating_add(1);
        }
        let until = Instant::now() + self.cooldown;
        match inner.state {
            CircuitState::HalfOpen => {
                warn!(cooldown = ?self.cooldown, error = %err, "probe failed, circuit breaker re-opened");
                inner.state = CircuitState::Open { until };
            }
            CircuitState::Closed
                if err.is_transient() && inner.consecutive_failures >= self.threshold =>
            {
                warn!(
                    failures = inner.consecutive_failures,
                    cooldown = ?self.cooldown,
                    "failure threshold reached, circuit breaker opened"
                );
                inner.state = CircuitState::Open { until };
            }
            CircuitState::Closed | CircuitState::Open { .. } => {}
        }
    }

    /// Current state (for diagnostics and tests)
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn state(&self) -> CircuitState {
        self.inner.lock().expect("circuit breaker lock poisoned").state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transient() -> FetchError {
        FetchError::Status {
            code: 503,
            reason: "Service Unavailable".to_string(),
        }
    }

    fn permanent() -> FetchError {
        FetchError::Status {
            code: 404,
            reason: "Not Found".to_string(),
        }
    }

    #[test]
    fn test_starts_closed_and_admits() {
        let breaker = CircuitBreaker::new(5, Duration::from_secs(30));
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert!(breaker.admit().is_ok());
    }

    #[test]
    fn test_opens_at_threshold() {
        let breaker = CircuitBreaker::new(3, Duration::from_secs(30));
        breaker.record_failure(&transient());
        breaker.record_failure(&transient());
        assert_eq!(breaker.state(), CircuitState::Closed);
        breaker.record_failure(&transient());
        assert!(matches!(breaker.state(), CircuitState::Open { .. }));
        assert!(matches!(breaker.admit(), Err(FetchError::CircuitOpen)));
    }

    #[test]
    fn test_success_resets_counter() {
        let breaker = CircuitBreaker::new(3, Duration::from_secs(30));
        breaker.record_failure(&transient());
        breaker.record_failure(&transient());
        breaker.record_success();
        breaker.record_failure(&transient());
        breaker.record_failure(&transient());
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[test]
    fn test_permanent_failures_do_not_count() {
        let breaker = CircuitBreaker::new(2, Duration::from_secs(30));
        breaker.record_failure(&permanent());
        breaker.record_failure(&permanent());
        breaker.record_failure(&permanent());
        assert_eq!(breaker.state(), CircuitState::Closed);
        // Nor do they reset progress toward the threshold.
        breaker.record_failure(&transient());
        breaker.record_failure(&permanent());
        breaker.record_failure(&transient());
        assert!(matches!(breaker.state(), CircuitState::Open { .. }));
    }

    #[test]
    fn test_cooldown_admits_single_probe() {
        let breaker = CircuitBreaker::new(1, Duration::from_millis(10));
        breaker.record_failure(&transient());
        assert!(matches!(breaker.admit(), Err(FetchError::CircuitOpen)));

        std::thread::sleep(Duration::from_millis(20));
        assert!(breaker.admit().is_ok());
        assert_eq!(breaker.state(), CircuitState::HalfOpen);
        // Probe outstanding: concurrent calls still fail fast.
        assert!(matches!(breaker.admit(), Err(FetchError::CircuitOpen)));
    }

    #[test]
    fn test_probe_success_closes() {
        let breaker = CircuitBreaker::new(1, Duration::from_millis(10));
        breaker.record_failure(&transient());
        std::thread::sleep(Duration::from_millis(20));
        assert!(breaker.admit().is_ok());
        breaker.record_success();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert!(breaker.admit().is_ok());
    }

    #[test]
    fn test_permanent_probe_failure_reopens_instead_of_wedging() {
        let breaker = CircuitBreaker::new(1, Duration::from_millis(10));
        breaker.record_failure(&transient());
        std::thread::sleep(Duration::from_millis(20));
        assert!(breaker.admit().is_ok());

        // The upstream answered the probe with a plain 404. The circuit
        // must still resolve to Open, not stay HalfOpen forever.
        breaker.record_failure(&permanent());
        assert!(matches!(breaker.state(), CircuitState::Open { .. }));
        assert!(matches!(breaker.admit(), Err(FetchError::CircuitOpen)));

        // And the recovery path is intact: the next cooldown admits a new
        // probe, and its success closes the circuit.
        std::thread::sleep(Duration::from_millis(20));
        assert!(breaker.admit().is_ok());
        breaker.record_success();
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[test]
    fn test_probe_failure_restarts_cooldown() {
        let breaker = CircuitBreaker::new(1, Duration::from_millis(10));
        breaker.record_failure(&transient());
        std::thread::sleep(Duration::from_millis(20));
        assert!(breaker.admit().is_ok());
        breaker.record_failure(&transient());
        assert!(matches!(breaker.state(), CircuitState::Open { .. }));
        assert!(matches!(breaker.admit(), Err(FetchError::CircuitOpen)));
    }
}
