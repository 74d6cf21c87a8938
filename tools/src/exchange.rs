//! Frankfurter currency-rate tool
//!
//! <https://frankfurter.app/> — unauthenticated reference rates published
//! by the ECB.

use crate::response_to_result;
use serde_json::json;
use spigot_core::{CacheOptions, Fetcher, Tool, ToolError, ToolExecutorFn, ToolResult, build_url};
use std::sync::Arc;

/// Default upstream base URL
pub const FRANKFURTER_BASE: &str = "https://api.frankfurter.app";

/// Create the `exchange_rates` tool against the public upstream
#[must_use]
pub fn exchange_rates_tool(fetcher: Arc<Fetcher>) -> (Tool, ToolExecutorFn) {
    exchange_rates_tool_at(FRANKFURTER_BASE, fetcher)
}

/// Create the `exchange_rates` tool against an explicit base URL
#[must_use]
pub fn exchange_rates_tool_at(base: &str, fetcher: Arc<Fetcher>) -> (Tool, ToolExecutorFn) {
    let tool = Tool {
        name: "exchange_rates".to_string(),
        description: "Get the latest currency exchange rates (ECB reference rates)".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "base": {
                    "type": "string",
                    "description": "Base currency code (default EUR)"
                },
                "symbols": {
                    "type": "string",
                    "description": "Comma-separated target currency codes, e.g. 'USD,GBP'"
                }
            }
        }),
    };

    let base_url = base.trim_end_matches('/').to_string();
    let executor: ToolExecutorFn = Arc::new(move |input: String| {
        let fetcher = fetcher.clone();
        let base_url = base_url.clone();
        Box::pin(async move {
            let parsed: serde_json::Value = serde_json::from_str(&input).map_err(|e| ToolError {
                message: format!("Invalid input JSON: {e}"),
            })?;

            let base_currency = parsed["base"].as_str();
            let symbols = parsed["symbols"].as_str();

            let url = build_url(
                &format!("{base_url}/latest"),
                &[("base", base_currency), ("symbols", symbols)],
            );

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
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> Arc<Fetcher> {
        Arc::new(Fetcher::new(FetcherConfig::default()))
    }

    #[test]
    fn test_schema() {
        let (tool, _executor) = exchange_rates_tool(fetcher());
        assert_eq!(tool.name, "exchange_rates");
        assert!(tool.input_schema.is_object());
    }

    #[tokio::test]
    async fn test_optional_params_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("base", "USD"))
            .and(query_param("symbols", "EUR,GBP"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"base":"USD","rates":{"EUR":0.92,"GBP":0.79}}"#),
            )
            .mount(&server)
            .await;

        let (_tool, executor) = exchange_rates_tool_at(&server.uri(), fetcher());
        let result = executor(json!({"base": "USD", "symbols": "EUR,GBP"}).to_string())
            .await
            .expect("should succeed");

        let value: serde_json::Value = serde_json::from_str(&result).expect("valid JSON");
        assert_eq!(value["rates"]["EUR"], 0.92);
    }

    #[tokio::test]
    async fn test_no_params_hits_bare_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"base":"EUR"}"#))
            .mount(&server)
            .await;

        let (_tool, executor) = exchange_rates_tool_at(&server.uri(), fetcher());
        let result = executor(json!({}).to_string()).await.expect("should succeed");

        let requests = server.received_requests().await.unwrap_or_default();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.query().is_none());
        assert!(result.contains("EUR"));
    }
}
