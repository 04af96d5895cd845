//! Direction listing and per-direction trend tools.

use serde_json::json;

use super::{McpTool, ToolContext, object_or_empty, response_format_schema};
use crate::error::{ToolError, ToolResult};
use crate::formatters;
use crate::models::{
    AllTrendsInput, DirectionTrendInput, ListDirectionsInput, ResponseFormat, resolve_range,
};

/// List tracked directions.
pub struct ListDirectionsTool;

#[async_trait::async_trait]
impl McpTool for ListDirectionsTool {
    fn name(&self) -> &'static str {
        "list_directions"
    }

    fn description(&self) -> &'static str {
        "List the AI research directions tracked by the dashboard, with their slugs. \
         Use a slug as the `direction` argument of other tools."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "responseFormat": response_format_schema()
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: ListDirectionsInput = serde_json::from_value(object_or_empty(input))?;
        let directions = ctx.dashboard.directions();
        let available = ctx.dashboard.source_directions().await;

        match params.response_format {
            ResponseFormat::Markdown => {
                let mut output = formatters::format_directions_markdown(directions);
                if let Some(available) = &available {
                    let missing = directions.iter().filter(|d| !available.contains(d)).count();
                    output.push_str(&format!(
                        "\n*The data source lists {} directions; {} tracked directions are not among them.*\n",
                        available.len(),
                        missing
                    ));
                }
                Ok(output)
            }
            ResponseFormat::Json => {
                let mut body = json!({
                    "total": directions.len(),
                    "directions": directions,
                });
                if let Some(available) = available {
                    body["sourceDirections"] = json!(available);
                }
                Ok(serde_json::to_string(&body)?)
            }
        }
    }
}

/// One direction's yearly series.
pub struct DirectionTrendTool;

#[async_trait::async_trait]
impl McpTool for DirectionTrendTool {
    fn name(&self) -> &'static str {
        "direction_trend"
    }

    fn description(&self) -> &'static str {
        "Yearly publication counts for one research direction. Years without data \
         read as 0. An inverted range (yearStart > yearEnd) returns an empty series."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "direction": {
                    "type": "string",
                    "description": "Direction slug (e.g. 'large_language_models') or display name"
                },
                "yearStart": {
                    "type": "integer",
                    "description": "First year (inclusive)"
                },
                "yearEnd": {
                    "type": "integer",
                    "description": "Last year (inclusive)"
                },
                "responseFormat": response_format_schema()
            },
            "required": ["direction"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: DirectionTrendInput = serde_json::from_value(input)?;
        if params.direction.trim().is_empty() {
            return Err(ToolError::validation("direction", "must not be empty"));
        }

        let dashboard = &ctx.dashboard;
        let direction = dashboard.resolve_direction(&params.direction);
        let range = resolve_range(params.year_start, params.year_end, dashboard.year_range())?;
        let series = dashboard.trend(&direction, range).await?;

        match params.response_format {
            ResponseFormat::Markdown => Ok(formatters::format_series_markdown(&direction, &series)),
            ResponseFormat::Json => Ok(serde_json::to_string(&formatters::series_json(
                &direction, &series,
            ))?),
        }
    }
}

/// Every tracked direction's series.
pub struct AllTrendsTool;

#[async_trait::async_trait]
impl McpTool for AllTrendsTool {
    fn name(&self) -> &'static str {
        "all_trends"
    }

    fn description(&self) -> &'static str {
        "Yearly series for every tracked direction. Directions whose data could not \
         be loaded are listed under failures; the rest are still returned."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "yearStart": {"type": "integer"},
                "yearEnd": {"type": "integer"},
                "responseFormat": response_format_schema()
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: AllTrendsInput = serde_json::from_value(object_or_empty(input))?;
        let dashboard = &ctx.dashboard;
        let range = resolve_range(params.year_start, params.year_end, dashboard.year_range())?;
        let outcome = dashboard.all_trends(range).await;

        match params.response_format {
            ResponseFormat::Markdown => {
                Ok(formatters::format_trends_markdown(dashboard.directions(), &outcome))
            }
            ResponseFormat::Json => Ok(serde_json::to_string(&formatters::trends_json(
                dashboard.directions(),
                &outcome,
            ))?),
        }
    }
}
