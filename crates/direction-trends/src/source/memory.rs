//! In-process data, optionally read from a local bulk JSON file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{BulkCounts, SeriesSource};
use crate::error::{SourceError, SourceResult};
use crate::models::{BulkSeries, Direction, YearCounts, YearRange};

/// Source backed by a map held in memory.
///
/// Directions can be marked as failing, which makes it a convenient stand-in
/// for a flaky backend. Every `fetch_series` call is counted per direction.
#[derive(Debug, Default)]
pub struct MemorySource {
    data: BulkCounts,
    path: Option<PathBuf>,
    failing: HashMap<Direction, FailureMode>,
    calls: Mutex<HashMap<Direction, u32>>,
    bulk: bool,
}

#[derive(Debug, Clone, Copy)]
enum FailureMode {
    /// Fail with a permanent error on every call.
    Always,
    /// Fail with a retryable error for the first `n` calls.
    Transient(u32),
}

impl MemorySource {
    #[must_use]
    pub fn new(data: BulkCounts) -> Self {
        Self { data, ..Self::default() }
    }

    /// Build from `(direction, [(year, count)])` pairs.
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, Vec<(i32, u64)>)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(d, points)| (Direction::new(d), points.into_iter().collect()))
                .collect(),
        )
    }

    /// Load a bulk `{directions, series}` JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> SourceResult<Self> {
        let bulk = read_bulk(path)?;
        tracing::info!(path = %path.display(), directions = bulk.series.len(), "Loaded data file");
        let mut source = Self::from_bulk(&bulk);
        source.path = Some(path.to_path_buf());
        Ok(source)
    }

    #[must_use]
    pub fn from_bulk(bulk: &BulkSeries) -> Self {
        let data = bulk
            .series
            .keys()
            .filter_map(|d| bulk.year_counts(d.as_str()).map(|c| (d.clone(), c)))
            .collect();
        Self::new(data)
    }

    /// Every fetch of `direction` fails permanently.
    #[must_use]
    pub fn failing(mut self, direction: &str) -> Self {
        self.failing.insert(Direction::new(direction), FailureMode::Always);
        self
    }

    /// The first `times` fetches of `direction` fail with a retryable error.
    #[must_use]
    pub fn flaky(mut self, direction: &str, times: u32) -> Self {
        self.failing.insert(Direction::new(direction), FailureMode::Transient(times));
        self
    }

    /// Advertise bulk fetching.
    #[must_use]
    pub const fn with_bulk(mut self) -> Self {
        self.bulk = true;
        self
    }

    /// Number of `fetch_series` calls made for `direction`.
    #[must_use]
    pub fn calls(&self, direction: &str) -> u32 {
        self.calls.lock().map(|c| c.get(direction).copied().unwrap_or(0)).unwrap_or(0)
    }

    fn record_call(&self, direction: &Direction) -> u32 {
        let Ok(mut calls) = self.calls.lock() else {
            return 0;
        };
        let n = calls.entry(direction.clone()).or_insert(0);
        *n += 1;
        *n
    }

    fn lookup(&self, direction: &Direction) -> SourceResult<YearCounts> {
        self.data
            .get(direction)
            .cloned()
            .ok_or_else(|| SourceError::not_found(format!("'{direction}'")))
    }
}

fn read_bulk(path: &Path) -> SourceResult<BulkSeries> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[async_trait::async_trait]
impl SeriesSource for MemorySource {
    fn name(&self) -> &'static str {
        if self.path.is_some() { "file" } else { "memory" }
    }

    async fn fetch_series(
        &self,
        direction: &Direction,
        _range: YearRange,
    ) -> SourceResult<YearCounts> {
        let attempt = self.record_call(direction);
        match self.failing.get(direction) {
            Some(FailureMode::Always) => {
                Err(SourceError::malformed(format!("'{direction}' is not valid series data")))
            }
            Some(FailureMode::Transient(times)) if attempt <= *times => {
                Err(SourceError::server(503, "temporarily unavailable"))
            }
            _ => self.lookup(direction),
        }
    }

    async fn fetch_bulk(
        &self,
        directions: &[Direction],
        _range: YearRange,
    ) -> SourceResult<BulkCounts> {
        if !self.bulk {
            return Err(SourceError::unsupported("fetch_bulk"));
        }
        Ok(directions
            .iter()
            .filter(|d| !self.failing.contains_key(*d))
            .filter_map(|d| self.data.get(d).map(|c| (d.clone(), c.clone())))
            .collect())
    }

    async fn latest_year(&self) -> SourceResult<Option<i32>> {
        Ok(self
            .data
            .values()
            .filter_map(|counts| counts.iter().rev().find(|(_, c)| **c > 0).map(|(y, _)| *y))
            .max())
    }

    async fn list_directions(&self) -> SourceResult<Vec<Direction>> {
        Ok(self.data.keys().cloned().collect())
    }
}
