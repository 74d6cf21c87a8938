//! RSS/Atom feed retrieval tool
//!
//! Feeds are XML, so the fetch core returns a raw-text success with no
//! parsed JSON; the body is passed through verbatim for the caller to
//! digest.

use crate::response_to_result;
use serde_json::json;
use spigot_core::{CacheOptions, Fetcher, Tool, ToolError, ToolExecutorFn, ToolResult};
use std::sync::Arc;
use std::time::Duration;

/// Cache lifetime for fetched feeds
const FEED_TTL: Duration = Duration::from_secs(5 * 60);

/// Create the `fetch_feed` tool
#[must_use]
pub fn fetch_feed_tool(fetcher: Arc<Fetcher>) -> (Tool, ToolExecutorFn) {
    let tool = Tool {
        name: "fetch_feed".to_string(),
        description: "Fetch an RSS or Atom feed and return its raw XML".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "Feed URL (must be http:// or https://)"
                }
            },
            "required": ["url"]
        }),
    };

    let executor: ToolExecutorFn = Arc::new(move |input: String| {
        let fetcher = fetcher.clone();
        Box::pin(async move {
            let parsed: serde_json::Value = serde_json::from_str(&input).map_err(|e| ToolError {
                message: format!("Invalid input JSON: {e}"),
            })?;

            let url = parsed["url"].as_str().ok_or_else(|| ToolError {
                message: "Missing 'url' field".to_string(),
            })?;

            // Security: Only allow http:// and https://
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ToolError {
                    message: "URL must start with http:// or https://".to_string(),
                });
            }

            let response = fetcher.fetch(url, &CacheOptions::with_ttl(FEED_TTL)).await;
            response_to_result(&response)
        })
            as std::pin::Pin<Box<dyn std::future::Future<Output = ToolResult> + Send>>
    });

    (tool, executor)
}
