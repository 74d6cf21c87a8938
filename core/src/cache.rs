//! Process-local response cache with per-entry expiry
//!
//! Keyed by the exact request URL (query string included), so distinct
//! parameter sets are distinct entries. Only successful responses are ever
//! stored; failures are re-attempted fresh on the next call. Best-effort:
//! two concurrent misses on the same URL may both hit the network, but a
//! stored entry is never observed half-written.

use crate::response::ToolResponse;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Default entry lifetime when caching is enabled and no TTL is supplied
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// Per-call cache configuration
#[derive(Clone, Debug)]
pub struct CacheOptions {
    /// Whether this call may read from and write to the cache
    pub enabled: bool,
    /// Entry lifetime; [`DEFAULT_CACHE_TTL`] when unset
    pub ttl: Option<Duration>,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: None,
        }
    }
}

impl CacheOptions {
    /// Options that bypass the cache entirely
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            ttl: None,
        }
    }

    /// Options with a custom entry lifetime
    #[must_use]
    pub const fn with_ttl(ttl: Duration) -> Self {
        Self {
            enabled: true,
            ttl: Some(ttl),
        }
    }

    /// The effective TTL for this call
    #[must_use]
    pub fn effective_ttl(&self) -> Duration {
        self.ttl.unwrap_or(DEFAULT_CACHE_TTL)
    }
}

struct CacheEntry {
    response: ToolResponse,
    expires_at: Instant,
}

/// Thread-safe URL → response cache
///
/// Reads clone the stored response out under a read lock; writes take the
/// write lock briefly. No lock is ever held across I/O.
#[derive(Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the live cached response for `url`, if any.
    ///
    /// Expired entries are treated as absent and removed lazily.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn get(&self, url: &str) -> Option<ToolResponse> {
        let expired = {
            let entries = self.entries.read().expect("response cache lock poisoned");
            match entries.get(url) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.response.clone());
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            let mut entries = self.entries.write().expect("response cache lock poisoned");
            if entries
                .get(url)
                .is_some_and(|entry| entry.expires_at <= Instant::now())
            {
                entries.remove(url);
            }
        }
        None
    }

    /// Store a successful response for `url`, replacing any previous entry.
    ///
    /// Failures are silently ignored; the cache holds successes only.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[allow(clippy::expect_used)]
    pub fn store(&self, url: &str, response: &ToolResponse, ttl: Duration) {
        if !response.is_success() {
            return;
        }
        let entry = CacheEntry {
            response: response.clone(),
            expires_at: Instant::now() + ttl,
        };
        let mut entries = self.entries.write().expect("response cache lock poisoned");
        entries.insert(url.to_string(), entry);
    }

    /// Number of stored entries, expired ones included
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn len(&self) -> usize {
        self.entries.read().expect("response cache lock poisoned").len()
    }

    /// Whether the cache holds no entries
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("response cache lock poisoned").is_empty()
    }

    /// Drop every entry
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[allow(clippy::expect_used)]
    pub fn clear(&self) {
        self.entries.write().expect("response cache lock poisoned").clear();
    }
}
