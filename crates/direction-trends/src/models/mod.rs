//! Data models for directions, yearly series and backend payloads.
//!
//! Tool inputs use `#[serde(rename_all = "camelCase")]`; backend payloads keep
//! the snake_case field names the hosted files use.

mod catalog;
mod direction;
mod enums;
mod inputs;
mod series;
mod wire;

pub use catalog::{CATALOG, DirectionInfo, default_directions, lookup};
pub use direction::{Direction, dedup_directions};
pub use enums::{ResponseFormat, SourceKind, Transform};
pub use inputs::*;
pub use series::{MAX_YEAR, MIN_YEAR, Series, SeriesMap, YearCount, YearCounts, YearRange};
pub use wire::{
    BulkSeries, DirectionSeriesResponse, LatestRankings, RankingRow, parse_year_counts,
};
