//! Open-Meteo forecast tool
//!
//! <https://open-meteo.com/> — unauthenticated forecast API keyed by
//! coordinates.

use crate::response_to_result;
use serde_json::json;
use spigot_core::{CacheOptions, Fetcher, Tool, ToolError, ToolExecutorFn, ToolResult, build_url};
use std::sync::Arc;

/// Default upstream base URL
pub const OPEN_METEO_BASE: &str = "https://api.open-meteo.com";

/// Create the `weather_forecast` tool against the public upstream
#[must_use]
pub fn weather_forecast_tool(fetcher: Arc<Fetcher>) -> (Tool, ToolExecutorFn) {
    weather_forecast_tool_at(OPEN_METEO_BASE, fetcher)
}

/// Create the `weather_forecast` tool against an explicit base URL
#[must_use]
pub fn weather_forecast_tool_at(base: &str, fetcher: Arc<Fetcher>) -> (Tool, ToolExecutorFn) {
    let tool = Tool {
        name: "weather_forecast".to_string(),
        description: "Get an hourly weather forecast for a location from Open-Meteo".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "latitude": {
                    "type": "number",
                    "description": "Latitude in decimal degrees"
                },
                "longitude": {
                    "type": "number",
                    "description": "Longitude in decimal degrees"
                },
                "hourly": {
                    "type": "string",
                    "description": "Comma-separated hourly variables (default: temperature_2m)"
                },
                "forecast_days": {
                    "type": "integer",
                    "description": "Number of forecast days (1-16, upstream default 7)"
                }
            },
            "required": ["latitude", "longitude"]
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

            let latitude = parsed["latitude"].as_f64().ok_or_else(|| ToolError {
                message: "Missing 'latitude' field".to_string(),
            })?;
            let longitude = parsed["longitude"].as_f64().ok_or_else(|| ToolError {
                message: "Missing 'longitude' field".to_string(),
            })?;

            let latitude = latitude.to_string();
            let longitude = longitude.to_string();
            let hourly = parsed["hourly"].as_str().unwrap_or("temperature_2m");
            let forecast_days = parsed["forecast_days"].as_u64().map(|d| d.to_string());

            let url = build_url(
                &format!("{base}/v1/forecast"),
                &[
                    ("latitude", Some(latitude.as_str())),
                    ("longitude", Some(longitude.as_str())),
                    ("hourly", Some(hourly)),
                    ("forecast_days", forecast_days.as_deref()),
                ],
            );

            let response = fetcher.fetch(&url, &CacheOptions::default()).await;
            response_to_result(&response)
        })
            as std::pin::Pin<Box<dyn std::future::Future<Output = ToolResult> + Send>>
    });

    (tool, executor)
}
