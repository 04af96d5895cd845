//! JSON output formatting.
//!
//! Shapes mirror the REST endpoints so MCP clients and HTTP clients see the
//! same payloads.

use serde_json::{Map, Value, json};

use crate::aggregate::{LoadOutcome, RankedEntry};
use crate::dashboard::{HeatmapView, RankingView};
use crate::error::DataUnavailable;
use crate::models::{Direction, Series};

/// `{direction, years, counts}` for one series.
#[must_use]
pub fn series_json(direction: &Direction, series: &Series) -> Value {
    json!({
        "direction": direction,
        "years": series.years(),
        "counts": series.counts(),
    })
}

/// `[{direction, reason}]` for every failed direction.
#[must_use]
pub fn failures_json(failures: &[DataUnavailable]) -> Value {
    Value::Array(
        failures
            .iter()
            .map(|f| json!({ "direction": f.direction, "reason": f.reason() }))
            .collect(),
    )
}

/// `[{direction, year, count}]` ranking rows.
#[must_use]
pub fn ranking_rows_json(year: i32, entries: &[RankedEntry]) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|e| json!({ "direction": e.direction, "year": year, "count": e.count }))
            .collect(),
    )
}

/// Ranking with rank numbers and failures.
#[must_use]
pub fn ranking_json(view: &RankingView) -> Value {
    let ranking: Vec<Value> = view
        .entries
        .iter()
        .enumerate()
        .map(|(i, e)| json!({ "rank": i + 1, "direction": e.direction, "count": e.count }))
        .collect();

    json!({
        "year": view.year,
        "precomputed": view.precomputed,
        "ranking": ranking,
        "failures": failures_json(&view.failures),
    })
}

/// `{years, directions, matrix, raw, scale, failures}`.
///
/// `matrix` holds the display values, `raw` the literal counts.
#[must_use]
pub fn heatmap_json(view: &HeatmapView) -> Value {
    json!({
        "years": view.matrix.years,
        "directions": view.matrix.directions,
        "matrix": view.matrix.values(),
        "raw": view.matrix.raw_counts(),
        "scale": view.transform.label(),
        "failures": failures_json(&view.failures),
    })
}

/// `{directions, series: {name: [{year, count}]}, failures}`.
#[must_use]
pub fn trends_json(directions: &[Direction], outcome: &LoadOutcome) -> Value {
    let mut series = Map::new();
    for direction in directions {
        if let Some(s) = outcome.series.get(direction.as_str()) {
            series.insert(direction.to_string(), json!(s.points()));
        }
    }

    json!({
        "directions": directions,
        "series": series,
        "failures": failures_json(&outcome.failures),
    })
}
