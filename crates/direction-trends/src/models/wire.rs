//! Raw JSON shapes served by the data backends.
//!
//! Hosted files carry year keys as strings and counts as plain numbers.
//! Parsing here is strict about shape so that a broken file surfaces as a
//! per-direction failure instead of silently turning into zeros.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Direction, YearCount, YearCounts};
use crate::error::{SourceError, SourceResult};

/// Parse a `{ "<year>": <count>, ... }` object.
///
/// `null` counts read as 0. Non-integer year keys and negative, fractional or
/// non-numeric counts are malformed.
pub fn parse_year_counts(value: &Value) -> SourceResult<YearCounts> {
    let obj = value
        .as_object()
        .ok_or_else(|| SourceError::malformed(format!("expected object, got {}", kind(value))))?;

    let mut out = YearCounts::new();
    for (key, raw) in obj {
        let year: i32 = key
            .trim()
            .parse()
            .map_err(|_| SourceError::malformed(format!("year key '{key}' is not an integer")))?;
        out.insert(year, parse_count(raw).map_err(|m| SourceError::malformed(format!("{year}: {m}")))?);
    }
    Ok(out)
}

fn parse_count(value: &Value) -> Result<u64, String> {
    match value {
        Value::Null => Ok(0),
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return Ok(v);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
                    Ok(f as u64)
                }
                _ => Err(format!("count {n} is not a non-negative integer")),
            }
        }
        other => Err(format!("count must be a number, got {}", kind(other))),
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Bulk payload: `{ directions: [...], series: { name: [{year, count}] } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSeries {
    #[serde(default)]
    pub directions: Vec<Direction>,
    #[serde(default)]
    pub series: BTreeMap<Direction, Vec<YearCount>>,
}

impl BulkSeries {
    /// Sparse counts for one direction, if present.
    #[must_use]
    pub fn year_counts(&self, direction: &str) -> Option<YearCounts> {
        self.series
            .get(direction)
            .map(|points| points.iter().map(|p| (p.year, p.count)).collect())
    }

    /// Directions listed in the payload; falls back to the series keys.
    #[must_use]
    pub fn listed_directions(&self) -> Vec<Direction> {
        if self.directions.is_empty() {
            self.series.keys().cloned().collect()
        } else {
            self.directions.clone()
        }
    }
}

/// Backend answer for a single direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionSeriesResponse {
    pub direction: Direction,
    #[serde(default)]
    pub years: Vec<i32>,
    #[serde(default)]
    pub counts: Vec<u64>,
}

impl DirectionSeriesResponse {
    /// Zip `years` and `counts`; mismatched lengths are malformed.
    pub fn into_year_counts(self) -> SourceResult<YearCounts> {
        if self.years.len() != self.counts.len() {
            return Err(SourceError::malformed(format!(
                "'{}' has {} years but {} counts",
                self.direction,
                self.years.len(),
                self.counts.len()
            )));
        }
        Ok(self.years.into_iter().zip(self.counts).collect())
    }
}

/// One row of a backend ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingRow {
    pub direction: Direction,
    #[serde(default)]
    pub year: Option<i32>,
    pub count: u64,
}

/// Backend answer for the latest ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestRankings {
    #[serde(default)]
    pub latest_year: Option<i32>,
    #[serde(default)]
    pub items: Vec<RankingRow>,
}
