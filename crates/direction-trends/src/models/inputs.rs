//! Input models for MCP tool parameters.

use serde::{Deserialize, Serialize};

use super::{MAX_YEAR, MIN_YEAR, ResponseFormat, YearRange};
use crate::error::{ToolError, ToolResult};

/// Input for `list_directions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDirectionsInput {
    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Input for `direction_trend`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionTrendInput {
    /// Direction slug or catalog display name.
    pub direction: String,

    /// First year (inclusive); defaults to the configured start.
    #[serde(default)]
    pub year_start: Option<i32>,

    /// Last year (inclusive); defaults to the configured end.
    #[serde(default)]
    pub year_end: Option<i32>,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Input for `all_trends`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllTrendsInput {
    #[serde(default)]
    pub year_start: Option<i32>,

    #[serde(default)]
    pub year_end: Option<i32>,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Input for `top_directions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDirectionsInput {
    /// Year to rank; defaults to the latest year with data.
    #[serde(default)]
    pub year: Option<i32>,

    /// How many directions to return. Zero or negative returns none.
    #[serde(default = "default_top_n")]
    pub top_n: i32,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl Default for TopDirectionsInput {
    fn default() -> Self {
        Self { year: None, top_n: default_top_n(), response_format: ResponseFormat::default() }
    }
}

fn default_top_n() -> i32 {
    15
}

/// Input for `direction_heatmap`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapInput {
    /// Column order; defaults to the full catalog.
    #[serde(default)]
    pub directions: Option<Vec<String>>,

    #[serde(default)]
    pub year_start: Option<i32>,

    #[serde(default)]
    pub year_end: Option<i32>,

    /// Apply `log1p` display scaling.
    #[serde(default = "default_use_log")]
    pub use_log: bool,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl Default for HeatmapInput {
    fn default() -> Self {
        Self {
            directions: None,
            year_start: None,
            year_end: None,
            use_log: default_use_log(),
            response_format: ResponseFormat::default(),
        }
    }
}

const fn default_use_log() -> bool {
    true
}

/// Input for `refresh_data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshInput {
    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Resolve optional bounds against a default range.
///
/// # Errors
///
/// Returns a validation error when either bound falls outside
/// [`MIN_YEAR`]..=[`MAX_YEAR`].
pub fn resolve_range(
    start: Option<i32>,
    end: Option<i32>,
    default: YearRange,
) -> ToolResult<YearRange> {
    let range = YearRange::new(start.unwrap_or(default.start), end.unwrap_or(default.end));
    if !range.is_bounded() {
        return Err(ToolError::validation(
            "yearStart/yearEnd",
            format!("years must lie within {MIN_YEAR}..={MAX_YEAR}, got {range}"),
        ));
    }
    Ok(range)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_top_directions_defaults() {
        let input: TopDirectionsInput = serde_json::from_value(json!({})).unwrap();
        assert_eq!(input.top_n, 15);
        assert!(input.year.is_none());
        assert!(input.response_format.is_markdown());
    }

    #[test]
    fn test_heatmap_defaults_to_log() {
        let input: HeatmapInput = serde_json::from_value(json!({"responseFormat": "json"})).unwrap();
        assert!(input.use_log);
        assert!(input.response_format.is_json());
    }

    #[test]
    fn test_resolve_range() {
        let default = YearRange::new(2010, 2025);
        assert_eq!(resolve_range(None, None, default).unwrap(), default);
        assert_eq!(resolve_range(Some(2020), None, default).unwrap(), YearRange::new(2020, 2025));
        // inverted but bounded stays an empty range
        assert!(resolve_range(Some(2025), Some(2010), default).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_range_rejects_unbounded_years() {
        let default = YearRange::new(2010, 2025);
        for (start, end) in [
            (Some(i32::MIN), Some(i32::MAX)),
            (None, Some(20_000_000)),
            (Some(1899), None),
            (Some(2101), Some(2000)),
        ] {
            let err = resolve_range(start, end, default).unwrap_err();
            assert!(matches!(err, ToolError::Validation { .. }), "{start:?}..{end:?}");
        }
        assert!(resolve_range(Some(MIN_YEAR), Some(MAX_YEAR), default).is_ok());
    }
}
