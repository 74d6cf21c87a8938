//! Resilient fetcher: the single operation every tool invokes
//!
//! Composes the cache, circuit breaker, retry policy, and response
//! normalizer into `fetch(url, options) -> ToolResponse`. Failure is always
//! a value at this boundary; nothing below it escapes as a raised fault.
//!
//! One fetcher is constructed per logical upstream surface and shared by
//! `Arc` among its tools, so the breaker state and cache are common to all
//! of them.

use crate::breaker::CircuitBreaker;
use crate::cache::{CacheOptions, ResponseCache};
use crate::error::FetchError;
use crate::response::ToolResponse;
use crate::retry::{RetryPolicy, execute_with_retry};
use std::time::Duration;
use tracing::debug;

/// Tunable constants for one fetcher instance
///
/// Defaults preserve the canonical constants: 3 attempts, 30-second
/// per-attempt timeout, 5-failure threshold, 30-second cooldown.
#[derive(Clone, Debug)]
pub struct FetcherConfig {
    /// Retry budget and backoff base
    pub retry: RetryPolicy,
    /// Hard deadline for a single HTTP attempt
    pub attempt_timeout: Duration,
    /// Consecutive failures before the circuit opens
    pub failure_threshold: u32,
    /// How long the circuit stays open before admitting a probe
    pub cooldown: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            attempt_timeout: Duration::from_secs(30),
            failure_threshold: 5,
            cooldown: Duration::from_secs(30),
        }
    }
}

impl FetcherConfig {
    /// Builder: set the total attempt budget
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.retry.max_attempts = max_attempts;
        self
    }

    /// Builder: set the backoff base delay
    #[must_use]
    pub const fn with_backoff_base(mut self, base: Duration) -> Self {
        self.retry.backoff_base = base;
        self
    }

    /// Builder: set the per-attempt timeout
    #[must_use]
    pub const fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Builder: set the circuit-breaker failure threshold
    #[must_use]
    pub const fn with_failure_threshold(mut self, threshold: u32) -> Self {
        self.failure_threshold = threshold;
        self
    }

    /// Builder: set the circuit-breaker cooldown
    #[must_use]
    pub const fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }
}

/// Shared resilient HTTP GET pipeline
pub struct Fetcher {
    client: reqwest::Client,
    cache: ResponseCache,
    breaker: CircuitBreaker,
    config: FetcherConfig,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(FetcherConfig::default())
    }
}

impl Fetcher {
    /// Create a fetcher with its own client, cache, and breaker state
    #[must_use]
    pub fn new(config: FetcherConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            cache: ResponseCache::new(),
            breaker: CircuitBreaker::new(config.failure_threshold, config.cooldown),
            config,
        }
    }

    /// The response cache owned by this fetcher
    #[must_use]
    pub const fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// The circuit breaker owned by this fetcher
    #[must_use]
    pub const fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    /// Issue a resilient GET against `url`.
    ///
    /// Order of operations: live cache entry → returned as-is with no
    /// network involvement; otherwise breaker admission, then the retried
    /// attempt loop, then normalization. Successes are cached when the
    /// options allow it; failures never are.
    pub async fn fetch(&self, url: &str, options: &CacheOptions) -> ToolResponse {
        if options.enabled {
            if let Some(hit) = self.cache.get(url) {
                debug!(url, "cache hit");
                return hit;
            }
        }

        match self.guarded_fetch(url).await {
            Ok(response) => {
                if options.enabled {
                    self.cache.store(url, &response, options.effective_ttl());
                }
                response
            }
            Err(err) => ToolResponse::from_error(url, &err),
        }
    }

    /// Convenience wrapper for `fetch` with default cache options
    pub async fn fetch_default(&self, url: &str) -> ToolResponse {
        self.fetch(url, &CacheOptions::default()).await
    }

    async fn guarded_fetch(&self, url: &str) -> Result<ToolResponse, FetchError> {
        self.breaker.admit()?;

        let outcome = execute_with_retry(&self.config.retry, self.config.attempt_timeout, || {
            self.attempt(url)
        })
        .await;

        match &outcome {
            Ok(_) => self.breaker.record_success(),
            Err(err) => self.breaker.record_failure(err),
        }
        outcome
    }

    /// One physical HTTP GET, classified into success or a typed error
    async fn attempt(&self, url: &str) -> Result<ToolResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_transport(&e))?;
        Ok(ToolResponse::success(url, body))
    }
}
