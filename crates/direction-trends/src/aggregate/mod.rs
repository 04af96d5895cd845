//! Aggregation core: load series, build heatmap matrices, rank directions.
//!
//! Data flows one way: [`SeriesLoader`] produces a [`SeriesMap`](crate::models::SeriesMap)
//! that [`build_matrix`] and [`rank`] consume. The builders are pure functions.

mod cache;
mod generation;
mod loader;
mod matrix;
mod ranker;

pub use cache::SeriesCache;
pub use generation::{Generation, Ticket};
pub use loader::{LoadOutcome, RetryPolicy, SeriesLoader};
pub use matrix::{MatrixCell, YearMatrix, build_matrix, build_matrix_with};
pub use ranker::{RankedEntry, clamp_top_n, rank, rank_all};
