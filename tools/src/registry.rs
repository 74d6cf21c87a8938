//! Thread-safe registry of catalogue tools
//!
//! The hosting process registers every tool once at startup and executes
//! them by name as calls arrive. Registration and lookup are cheap; the
//! lock is released before an executor runs, so slow upstreams never block
//! the registry.

use spigot_core::{Tool, ToolError, ToolExecutorFn, ToolResult};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe tool registry
///
/// ## Example
///
/// ```ignore
/// use spigot_tools::{ToolRegistry, weather::weather_forecast_tool};
///
/// let registry = ToolRegistry::new();
/// let (tool, executor) = weather_forecast_tool(fetcher);
/// registry.register(tool, executor);
/// let result = registry
///     .execute("weather_forecast", r#"{"latitude":41.39,"longitude":2.17}"#.to_string())
///     .await;
/// ```
#[derive(Clone)]
pub struct ToolRegistry {
    tools: Arc<RwLock<HashMap<String, (Tool, ToolExecutorFn)>>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a tool with its executor.
    ///
    /// Replaces any tool with the same name; returns `true` when a
    /// replacement happened.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[allow(clippy::expect_used)]
    pub fn register(&self, tool: Tool, executor: ToolExecutorFn) -> bool {
        let mut tools = self.tools.write().expect("tool registry lock poisoned");
        tools.insert(tool.name.clone(), (tool, executor)).is_some()
    }

    /// Execute a tool by name with a raw JSON input string.
    ///
    /// # Errors
    ///
    /// Returns `ToolError` if the tool is not registered or its executor
    /// fails.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[allow(clippy::expect_used)]
    pub async fn execute(&self, name: &str, input: String) -> ToolResult {
        // Clone the executor out so the lock is not held during execution.
        let executor = {
            let tools = self.tools.read().expect("tool registry lock poisoned");
            tools.get(name).map(|(_, executor)| executor.clone())
        };

        match executor {
            Some(executor) => {
                tracing::debug!(tool = name, "executing tool");
                executor(input).await
            }
            None => Err(ToolError {
                message: format!("Tool not found: {name}"),
            }),
        }
    }

    /// All registered tool names, sorted alphabetically
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn list_tools(&self) -> Vec<String> {
        let tools = self.tools.read().expect("tool registry lock poisoned");
        let mut names: Vec<String> = tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// All registered tool definitions, sorted by name (for advertising the
    /// catalogue to a calling agent)
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn get_tools(&self) -> Vec<Tool> {
        let tools = self.tools.read().expect("tool registry lock poisoned");
        let mut tool_list: Vec<Tool> = tools.values().map(|(tool, _)| tool.clone()).collect();
        tool_list.sort_by(|a, b| a.name.cmp(&b.name));
        tool_list
    }

    /// A specific tool definition, or `None` when not registered
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn get_tool(&self, name: &str) -> Option<Tool> {
        let tools = self.tools.read().expect("tool registry lock poisoned");
        tools.get(name).map(|(tool, _)| tool.clone())
    }

    /// Remove a tool; returns `true` when it existed
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn unregister(&self, name: &str) -> bool {
        let mut tools = self.tools.write().expect("tool registry lock poisoned");
        tools.remove(name).is_some()
    }

    /// Number of registered tools
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn count(&self) -> usize {
        let tools = self.tools.read().expect("tool registry lock poisoned");
        tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
