//! Year × direction heatmap tool.

use serde_json::json;

use super::{McpTool, ToolContext, object_or_empty, response_format_schema};
use crate::error::{ToolError, ToolResult};
use crate::formatters;
use crate::models::{HeatmapInput, ResponseFormat, resolve_range};

/// Heatmap matrix over years and directions.
pub struct DirectionHeatmapTool;

#[async_trait::async_trait]
impl McpTool for DirectionHeatmapTool {
    fn name(&self) -> &'static str {
        "direction_heatmap"
    }

    fn description(&self) -> &'static str {
        "Year × direction matrix of publication counts, in the requested column order. \
         `useLog` applies log1p display scaling; raw counts are always included."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "directions": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Column order (default: all tracked directions)"
                },
                "yearStart": {"type": "integer"},
                "yearEnd": {"type": "integer"},
                "useLog": {
                    "type": "boolean",
                    "default": true
                },
                "responseFormat": response_format_schema()
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: HeatmapInput = serde_json::from_value(object_or_empty(input))?;
        let dashboard = &ctx.dashboard;

        let directions = params.directions.as_ref().map(|names| {
            names.iter().map(|name| dashboard.resolve_direction(name)).collect::<Vec<_>>()
        });
        if directions.as_ref().is_some_and(|d| d.iter().any(|d| d.as_str().is_empty())) {
            return Err(ToolError::validation("directions", "entries must not be empty"));
        }

        let range = resolve_range(params.year_start, params.year_end, dashboard.year_range())?;
        let view = dashboard.heatmap(directions, range, params.use_log).await;

        match params.response_format {
            ResponseFormat::Markdown => Ok(formatters::format_heatmap_markdown(&view)),
            ResponseFormat::Json => Ok(serde_json::to_string(&formatters::heatmap_json(&view))?),
        }
    }
}
