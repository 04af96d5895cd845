//! Cache refresh tool.

use serde_json::json;

use super::{McpTool, ToolContext, object_or_empty, response_format_schema};
use crate::error::ToolResult;
use crate::formatters;
use crate::models::{RefreshInput, ResponseFormat};

/// Drop cached data so the next view refetches.
pub struct RefreshDataTool;

#[async_trait::async_trait]
impl McpTool for RefreshDataTool {
    fn name(&self) -> &'static str {
        "refresh_data"
    }

    fn description(&self) -> &'static str {
        "Clear cached series so the next request refetches from the data source. \
         In-flight board selections are discarded."
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
        let params: RefreshInput = serde_json::from_value(object_or_empty(input))?;
        let report = ctx.dashboard.refresh().await;

        match params.response_format {
            ResponseFormat::Markdown => Ok(formatters::format_refresh_markdown(&report)),
            ResponseFormat::Json => Ok(serde_json::to_string(&report)?),
        }
    }
}
