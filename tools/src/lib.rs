//! Per-API tool catalogue
//!
//! Every module here is mechanical glue over the shared resilient fetch
//! core: parse the tool input, build a query string, call
//! [`Fetcher::fetch`], render the normalized response as the tool result.
//! Upstream misbehavior (timeouts, 5xx storms, malformed payloads) is
//! absorbed by the core, so tool code never handles a raised fault.
//!
//! ## Modules
//!
//! - `weather`: Open-Meteo forecasts
//! - `wikipedia`: Wikipedia page summaries
//! - `hackernews`: Hacker News top stories and item lookup
//! - `exchange`: Frankfurter currency rates
//! - `feeds`: raw RSS/Atom feed retrieval (non-JSON upstream)
//! - `registry`: thread-safe tool registry
//!
//! Each tool factory takes the shared `Arc<Fetcher>`; a `*_at` variant
//! accepts a base URL override so tests can point the tool at a local mock
//! server.

pub mod exchange;
pub mod feeds;
pub mod hackernews;
pub mod registry;
pub mod weather;
pub mod wikipedia;

pub use registry::ToolRegistry;
pub use spigot_core::{Tool, ToolError, ToolExecutorFn, ToolResult};

use spigot_core::{Fetcher, ToolResponse};
use std::sync::Arc;

/// Render a normalized fetch response as a tool result.
///
/// Successes yield the parsed JSON re-serialized (or the raw body when the
/// upstream is not JSON, e.g. an RSS feed); failures become a [`ToolError`]
/// carrying the normalized message.
///
/// # Errors
///
/// Returns `ToolError` when the response is a failure.
pub fn response_to_result(response: &ToolResponse) -> ToolResult {
    if let Some(message) = response.error_message() {
        return Err(ToolError {
            message: message.to_string(),
        });
    }
    match response.json() {
        Some(json) => Ok(json.to_string()),
        None => Ok(response.body().unwrap_or_default().to_string()),
    }
}

/// Build a registry holding the full catalogue, all sharing one fetcher
#[must_use]
pub fn default_catalogue(fetcher: &Arc<Fetcher>) -> ToolRegistry {
    let registry = ToolRegistry::new();
    let tools = [
        weather::weather_forecast_tool(fetcher.clone()),
        wikipedia::wikipedia_summary_tool(fetcher.clone()),
        hackernews::hn_top_stories_tool(fetcher.clone()),
        hackernews::hn_item_tool(fetcher.clone()),
        exchange::exchange_rates_tool(fetcher.clone()),
        feeds::fetch_feed_tool(fetcher.clone()),
    ];
    for (tool, executor) in tools {
        registry.register(tool, executor);
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use spigot_core::FetcherConfig;

    #[test]
    fn test_response_to_result_success_json() {
        let response = ToolResponse::success("https://x/data", r#"{"value":42}"#);
        let result = response_to_result(&response).expect("should succeed");
        assert_eq!(result, r#"{"value":42}"#);
    }

    #[test]
    fn test_response_to_result_success_raw_text() {
        let response = ToolResponse::success("https://x/feed", "<rss></rss>");
        let result = response_to_result(&response).expect("should succeed");
        assert_eq!(result, "<rss></rss>");
    }

    #[test]
    fn test_response_to_result_failure() {
        let response = ToolResponse::failure("https://x/data", "upstream broke", Some(500));
        let err = response_to_result(&response).expect_err("should fail");
        assert_eq!(err.message, "upstream broke");
    }

    #[test]
    fn test_default_catalogue_registers_every_tool() {
        let fetcher = Arc::new(Fetcher::new(FetcherConfig::default()));
        let registry = default_catalogue(&fetcher);
        assert_eq!(
            registry.list_tools(),
            vec![
                "exchange_rates",
                "fetch_feed",
                "hn_item",
                "hn_top_stories",
                "weather_forecast",
                "wikipedia_summary",
            ]
        );
    }
}
