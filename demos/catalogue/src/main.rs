//! Catalogue Demo
//!
//! Wires one shared fetcher, registers the full tool catalogue, and runs a
//! few live calls against public upstreams. Demonstrates:
//! - One `Fetcher` instance shared by every tool (common cache + breaker)
//! - Executing tools by name through the registry
//! - The second identical call answering from the cache
//!
//! Run it:
//! ```bash
//! RUST_LOG=debug cargo run -p catalogue-demo
//! ```

use spigot_core::{Fetcher, FetcherConfig};
use spigot_tools::default_catalogue;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,spigot_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let fetcher = Arc::new(Fetcher::new(FetcherConfig::default()));
    let registry = default_catalogue(&fetcher);

    tracing::info!(tools = ?registry.list_tools(), "catalogue registered");

    let calls = [
        (
            "weather_forecast",
            serde_json::json!({"latitude": 41.39, "longitude": 2.17}),
        ),
        ("hn_top_stories", serde_json::json!({"limit": 5})),
        // Identical to the first call: answered from the cache, watch the
        // debug log for the hit.
        (
            "weather_forecast",
            serde_json::json!({"latitude": 41.39, "longitude": 2.17}),
        ),
    ];

    for (name, input) in calls {
        match registry.execute(name, input.to_string()).await {
            Ok(result) => {
                let preview: String = result.chars().take(200).collect();
                tracing::info!(tool = name, "{preview}");
            }
            Err(err) => tracing::warn!(tool = name, error = %err, "tool call failed"),
        }
    }
}
