//! Year ranking tool.

use serde_json::json;

use super::{McpTool, ToolContext, object_or_empty, response_format_schema};
use crate::aggregate::clamp_top_n;
use crate::error::ToolResult;
use crate::formatters;
use crate::models::{ResponseFormat, TopDirectionsInput};

/// Top directions for a year.
pub struct TopDirectionsTool;

#[async_trait::async_trait]
impl McpTool for TopDirectionsTool {
    fn name(&self) -> &'static str {
        "top_directions"
    }

    fn description(&self) -> &'static str {
        "Rank research directions by publication count for one year, highest first. \
         Ties keep catalog order. Defaults to the latest year with data."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "year": {
                    "type": "integer",
                    "description": "Year to rank (default: latest year with data)"
                },
                "topN": {
                    "type": "integer",
                    "default": 15,
                    "description": "Number of directions to return; 0 returns none"
                },
                "responseFormat": response_format_schema()
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: TopDirectionsInput = serde_json::from_value(object_or_empty(input))?;
        let view = ctx.dashboard.rankings(params.year, clamp_top_n(params.top_n.into())).await;

        match params.response_format {
            ResponseFormat::Markdown => Ok(formatters::format_ranking_markdown(&view)),
            ResponseFormat::Json => Ok(serde_json::to_string(&formatters::ranking_json(&view))?),
        }
    }
}
