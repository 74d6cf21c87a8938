//! Hacker News tools
//!
//! Two endpoints from the public Firebase API: the top-stories ID list and
//! single-item lookup. Story IDs churn quickly, so the list is cached with
//! a short TTL instead of the 15-minute default.

use crate::response_to_result;
use serde_json::json;
use spigot_core::{CacheOptions, Fetcher, Tool, ToolError, ToolExecutorFn, ToolResult};
use std::sync::Arc;
use std::time::Duration;

/// Default upstream base URL
pub const HACKER_NEWS_BASE: &str = "https://hacker-news.firebaseio.com";

/// Cache lifetime for the top-stories list
const TOP_STORIES_TTL: Duration = Duration::from_secs(5 * 60);

/// How many story IDs to return when the caller does not say
const DEFAULT_STORY_LIMIT: usize = 10;

/// Create the `hn_top_stories` tool against the public upstream
#[must_use]
pub fn hn_top_stories_tool(fetcher: Arc<Fetcher>) -> (Tool, ToolExecutorFn) {
    hn_top_stories_tool_at(HACKER_NEWS_BASE, fetcher)
}

/// Create the `hn_top_stories` tool against an explicit base URL
#[must_use]
pub fn hn_top_stories_tool_at(base: &str, fetcher: Arc<Fetcher>) -> (Tool, ToolExecutorFn) {
    let tool = Tool {
        name: "hn_top_stories".to_string(),
        description: "Get the current top story IDs from Hacker News".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of story IDs to return (default 10)"
                }
            }
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
            let limit = parsed["limit"]
                .as_u64()
                .and_then(|l| usize::try_from(l).ok())
                .unwrap_or(DEFAULT_STORY_LIMIT);

            let url = format!("{base}/v0/topstories.json");
            let response = fetcher
                .fetch(&url, &CacheOptions::with_ttl(TOP_STORIES_TTL))
                .await;

            if let Some(message) = response.error_message() {
                return Err(ToolError {
                    message: message.to_string(),
                });
            }
            let ids: Vec<u64> = response.parse().ok_or_else(|| ToolError {
                message: "Unexpected top-stories payload: expected a JSON array of item IDs"
                    .to_string(),
            })?;
            let limited: Vec<u64> = ids.into_iter().take(limit).collect();
            Ok(json!({ "ids": limited }).to_string())
        })
            as std::pin::Pin<Box<dyn std::future::Future<Output = ToolResult> + Send>>
    });

    (tool, executor)
}

/// Create the `hn_item` tool against the public upstream
#[must_use]
pub fn hn_item_tool(fetcher: Arc<Fetcher>) -> (Tool, ToolExecutorFn) {
    hn_item_tool_at(HACKER_NEWS_BASE, fetcher)
}

/// Create the `hn_item` tool against an explicit base URL
#[must_use]
pub fn hn_item_tool_at(base: &str, fetcher: Arc<Fetcher>) -> (Tool, ToolExecutorFn) {
    let tool = Tool {
        name: "hn_item".to_string(),
        description: "Get a Hacker News item (story, comment, job) by ID".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "integer",
                    "description": "Numeric item ID"
                }
            },
            "required": ["id"]
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
            let id = parsed["id"].as_u64().ok_or_else(|| ToolError {
                message: "Missing 'id' field".to_string(),
            })?;

            let url = format!("{base}/v0/item/{id}.json");
            let response = fetcher.fetch(&url, &CacheOptions::default()).await;
            response_to_result(&response)
        })
            as std::pin::Pin<Box<dyn std::future::Future<Output = ToolResult> + Send>>
    });

    (tool, executor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spigot_core::FetcherConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> Arc<Fetcher> {
        Arc::new(Fetcher::new(FetcherConfig::default()))
    }

    #[test]
    fn test_schemas() {
        let (top, _executor) = hn_top_stories_tool(fetcher());
        assert_eq!(top.name, "hn_top_stories");
        let (item, _executor) = hn_item_tool(fetcher());
        assert_eq!(item.name, "hn_item");
    }

    #[tokio::test]
    async fn test_top_stories_limit_applied() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/topstories.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[1,2,3,4,5]"))
            .mount(&server)
            .await;

        let (_tool, executor) = hn_top_stories_tool_at(&server.uri(), fetcher());
        let result = executor(json!({"limit": 3}).to_string())
            .await
            .expect("should succeed");

        let value: serde_json::Value = serde_json::from_str(&result).expect("valid JSON");
        assert_eq!(value["ids"], json!([1, 2, 3]));
    }

    #[tokio::test]
    async fn test_top_stories_malformed_payload_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/topstories.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"not":"an array"}"#))
            .mount(&server)
            .await;

        let (_tool, executor) = hn_top_stories_tool_at(&server.uri(), fetcher());
        let err = executor(json!({}).to_string())
            .await
            .expect_err("should fail");
        assert!(err.message.contains("array"));
    }

    #[tokio::test]
    async fn test_item_requires_id() {
        let (_tool, executor) = hn_item_tool(fetcher());
        let result = executor(json!({}).to_string()).await;
        assert!(result.expect_err("should fail").message.contains("id"));
    }

    #[tokio::test]
    async fn test_item_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/item/8863.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"id":8863,"type":"story"}"#),
            )
            .mount(&server)
            .await;

        let (_tool, executor) = hn_item_tool_at(&server.uri(), fetcher());
        let result = executor(json!({"id": 8863}).to_string())
            .await
            .expect("should succeed");

        let value: serde_json::Value = serde_json::from_str(&result).expect("valid JSON");
        assert_eq!(value["id"], 8863);
    }
}
