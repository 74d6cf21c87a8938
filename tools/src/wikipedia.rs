//! Wikipedia page-summary tool
//!
//! Uses the Wikimedia REST API (`/page/summary/{title}`), which answers
//! JSON for known pages and 404 for unknown ones.

use crate::response_to_result;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde_json::json;
use spigot_core::{CacheOptions, Fetcher, Tool, ToolError, ToolExecutorFn, ToolResult};
use std::sync::Arc;

/// Characters that must be escaped inside a URL path segment; notably `?`
/// and `#`, which would otherwise be reparsed as query/fragment
/// delimiters.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Default upstream base URL (English Wikipedia)
pub const WIKIPEDIA_BASE: &str = "https://en.wikipedia.org/api/rest_v1";

/// Create the `wikipedia_summary` tool against the public upstream
#[must_use]
pub fn wikipedia_summary_tool(fetcher: Arc<Fetcher>) -> (Tool, ToolExecutorFn) {
    wikipedia_summary_tool_at(WIKIPEDIA_BASE, fetcher)
}

/// Create the `wikipedia_summary` tool against an explicit base URL
#[must_use]
pub fn wikipedia_summary_tool_at(base: &str, fetcher: Arc<Fetcher>) -> (Tool, ToolExecutorFn) {
    let tool = Tool {
        name: "wikipedia_summary".to_string(),
        description: "Get the lead summary of a Wikipedia article by title".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Article title, e.g. 'Rust (programming language)'"
                }
            },
            "required": ["title"]
        }),
    };

    let base = base.trim_end_matches('/').to_string();
    let executor: ToolExecutorFn = Arc::new(move |input: String| {
        let fetcher = fetcher.clone();
        let base = base.clone();
        Box::pin(async move {
            let parsed: serde_json::Value = serde_json::from_str(&input).map_err(|e| ToolError {
                message: format!("Invalid input JSON: {e}"),
            })?;

            let title = parsed["title"].as_str().ok_or_else(|| ToolError {
                message: "Missing 'title' field".to_string(),
            })?;
            if title.trim().is_empty() {
                return Err(ToolError {
                    message: "'title' must not be empty".to_string(),
                });
            }

            // Wikipedia titles use underscores for spaces; everything else
            // is escaped so it stays inside the path segment.
            let slug = title.trim().replace(' ', "_");
            let slug = utf8_percent_encode(&slug, PATH_SEGMENT);
            let url = format!("{base}/page/summary/{slug}");

            let response = fetcher.fetch(&url, &CacheOptions::default()).await;
            response_to_result(&response)
        })
            as std::pin::Pin<Box<dyn std::future::Future<Output = ToolResult> + Send>>
    });

    (tool, executor)
}
