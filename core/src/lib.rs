//! # Spigot Core
//!
//! Resilient API access layer shared by every tool in the catalogue.
//!
//! The tool modules themselves are mechanical: build a query string, call
//! [`Fetcher::fetch`], hand back the result. Everything hard lives here, on
//! one code path:
//!
//! - **URL builder**: pure base + parameters → encoded URL, dropping
//!   absent/empty values
//! - **Cache layer**: URL → last successful response, per-entry TTL,
//!   per-call opt-out
//! - **Retry policy**: bounded attempts with exponential backoff over
//!   transient failures only
//! - **Circuit breaker**: fails fast against a consistently failing
//!   upstream, with a cooldown and a single half-open probe
//! - **Response normalizer**: every physical outcome becomes a
//!   [`ToolResponse`] value; non-JSON 2xx bodies degrade to raw-text
//!   success, and no failure mode escapes as a raised fault
//!
//! ## Example
//!
//! ```ignore
//! use spigot_core::{CacheOptions, Fetcher, FetcherConfig, build_url};
//! use std::sync::Arc;
//!
//! let fetcher = Arc::new(Fetcher::new(FetcherConfig::default()));
//! let url = build_url(
//!     "https://api.open-meteo.com/v1/forecast",
//!     &[("latitude", Some("41.39")), ("longitude", Some("2.17"))],
//! );
//! let response = fetcher.fetch(&url, &CacheOptions::default()).await;
//! if let Some(json) = response.json() {
//!     println!("{json}");
//! }
//! ```

pub mod breaker;
pub mod cache;
pub mod error;
pub mod fetcher;
pub mod response;
pub mod retry;
pub mod tool;
pub mod url;

pub use breaker::{CircuitBreaker, CircuitState};
pub use cache::{CacheOptions, DEFAULT_CACHE_TTL, ResponseCache};
pub use error::FetchError;
pub use fetcher::{Fetcher, FetcherConfig};
pub use response::{Outcome, ToolResponse};
pub use retry::{RetryPolicy, execute_with_retry};
pub use tool::{Tool, ToolError, ToolExecutorFn, ToolResult};
pub use url::build_url;
