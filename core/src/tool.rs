//! Tool abstraction shared by the catalogue
//!
//! A tool is a named operation with a JSON input schema and an async
//! executor. Executors receive the raw JSON input string and return either
//! a result string (usually JSON) or a [`ToolError`].

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Tool definition exposed to a calling agent
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name (used to identify which tool to call)
    pub name: String,
    /// Human-readable description of what the tool does
    pub description: String,
    /// JSON schema for the tool's input parameters
    pub input_schema: serde_json::Value,
}

/// Result from tool execution
pub type ToolResult = Result<String, ToolError>;

/// Tool execution errors
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolError {
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ToolError {}

/// Boxed async executor paired with a [`Tool`] definition
pub type ToolExecutorFn =
    Arc<dyn Fn(String) -> Pin<Box<dyn Future<Output = ToolResult> + Send>> + Send + Sync>;
