//! MCP tool implementations.
//!
//! Each tool parses its input, calls the [`Dashboard`], and formats the
//! result as Markdown or JSON.

mod directions;
mod heatmap;
mod rankings;
mod refresh;

pub use directions::*;
pub use heatmap::*;
pub use rankings::*;
pub use refresh::*;

use std::sync::Arc;

use crate::dashboard::Dashboard;
use crate::error::ToolResult;

/// Tool execution context.
pub struct ToolContext {
    /// Shared dashboard.
    pub dashboard: Arc<Dashboard>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub const fn new(dashboard: Arc<Dashboard>) -> Self {
        Self { dashboard }
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "direction_heatmap").
    fn name(&self) -> &'static str;

    /// Tool description for LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with given input.
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String>;
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        // Series views (3)
        Box::new(directions::ListDirectionsTool),
        Box::new(directions::DirectionTrendTool),
        Box::new(directions::AllTrendsTool),
        // Ranking (1)
        Box::new(rankings::TopDirectionsTool),
        // Heatmap (1)
        Box::new(heatmap::DirectionHeatmapTool),
        // Maintenance (1)
        Box::new(refresh::RefreshDataTool),
    ]
}

/// Shared `responseFormat` schema property.
fn response_format_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "enum": ["markdown", "json"],
        "default": "markdown"
    })
}

/// Treat a JSON `null` input as an empty object.
fn object_or_empty(input: serde_json::Value) -> serde_json::Value {
    if input.is_null() { serde_json::json!({}) } else { input }
}
