//! Dashboard facade shared by every view.
//!
//! Tools and HTTP handlers never touch the loader or cache directly; they go
//! through [`Dashboard`], which owns the session cache and the board state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::aggregate::{
    Generation, LoadOutcome, RankedEntry, SeriesLoader, YearMatrix, build_matrix, rank,
};
use crate::config::Config;
use crate::error::{DataUnavailable, Superseded};
use crate::models::{
    Direction, Series, SeriesMap, Transform, YearRange, dedup_directions, default_directions,
    lookup,
};
use crate::source::SeriesSource;

/// A ranking for one year.
#[derive(Debug)]
pub struct RankingView {
    pub year: i32,
    pub entries: Vec<RankedEntry>,
    /// True when the backend ranked and the local ranker was bypassed.
    pub precomputed: bool,
    pub failures: Vec<DataUnavailable>,
}

/// Heatmap data plus the directions that could not be loaded.
#[derive(Debug)]
pub struct HeatmapView {
    pub matrix: YearMatrix,
    pub transform: Transform,
    pub failures: Vec<DataUnavailable>,
}

/// The committed ranking selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardState {
    pub year: i32,
    pub entries: Vec<RankedEntry>,
    pub generation: u64,
}

/// Outcome of an explicit refresh.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    pub status: &'static str,
    pub cleared: u64,
    pub generation: u64,
    pub updated_at: DateTime<Utc>,
}

/// Entry point for all dashboard views.
pub struct Dashboard {
    loader: SeriesLoader,
    directions: Vec<Direction>,
    range: YearRange,
    top_n: usize,
    use_backend_rankings: bool,
    generation: Generation,
    board: RwLock<Option<BoardState>>,
    updated_at: RwLock<Option<DateTime<Utc>>>,
}

impl Dashboard {
    /// Create a dashboard over the full direction catalog.
    #[must_use]
    pub fn new(source: Arc<dyn SeriesSource>, config: &Config) -> Self {
        Self::with_directions(source, config, default_directions())
    }

    /// Create a dashboard over a custom direction list (column order kept).
    #[must_use]
    pub fn with_directions(
        source: Arc<dyn SeriesSource>,
        config: &Config,
        directions: Vec<Direction>,
    ) -> Self {
        Self {
            loader: SeriesLoader::new(source, config),
            directions: dedup_directions(&directions),
            range: config.year_range(),
            top_n: config.top_n,
            use_backend_rankings: config.use_backend_rankings,
            generation: Generation::new(),
            board: RwLock::new(None),
            updated_at: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    #[must_use]
    pub const fn year_range(&self) -> YearRange {
        self.range
    }

    #[must_use]
    pub const fn default_top_n(&self) -> usize {
        self.top_n
    }

    #[must_use]
    pub const fn loader(&self) -> &SeriesLoader {
        &self.loader
    }

    /// Map a slug or catalog display name onto a direction.
    ///
    /// Unknown input is passed through as an opaque identifier.
    #[must_use]
    pub fn resolve_direction(&self, query: &str) -> Direction {
        let query = query.trim();
        if let Some(known) = self.directions.iter().find(|d| d.as_str() == query) {
            return known.clone();
        }
        lookup(query).map_or_else(|| Direction::new(query), |info| info.direction())
    }

    /// Directions the data source itself reports, when it can list them.
    pub async fn source_directions(&self) -> Option<Vec<Direction>> {
        match self.loader.source().list_directions().await {
            Ok(directions) => Some(directions),
            Err(e) if e.is_unsupported() => None,
            Err(e) => {
                tracing::warn!(error = %e, "Listing source directions failed");
                None
            }
        }
    }

    /// Load series for `directions` over `range`, possibly partially.
    pub async fn get_series_map(&self, directions: &[Direction], range: YearRange) -> LoadOutcome {
        self.loader.load(directions, range).await
    }

    /// Heatmap matrix in the given order, optionally `log1p`-scaled.
    #[must_use]
    pub fn get_matrix(
        &self,
        series: &SeriesMap,
        directions: &[Direction],
        years: &[i32],
        use_log: bool,
    ) -> YearMatrix {
        build_matrix(series, directions, years, Transform::from_use_log(use_log))
    }

    /// Top `n` directions for `year`.
    #[must_use]
    pub fn get_top_n(
        &self,
        series: &SeriesMap,
        directions: &[Direction],
        year: i32,
        n: usize,
    ) -> Vec<RankedEntry> {
        rank(series, directions, year, n)
    }

    /// One direction's series.
    pub async fn trend(
        &self,
        direction: &Direction,
        range: YearRange,
    ) -> Result<Series, DataUnavailable> {
        self.loader.load_one(direction, range).await
    }

    /// Every configured direction's series, fetched independently.
    pub async fn all_trends(&self, range: YearRange) -> LoadOutcome {
        let mut settled = std::collections::HashMap::with_capacity(self.directions.len());
        let mut stream = self.loader.load_each(&self.directions, range);
        while let Some((direction, result)) = stream.next().await {
            tracing::debug!(%direction, ok = result.is_ok(), "Trend settled");
            settled.insert(direction, result);
        }

        let mut outcome = LoadOutcome::default();
        for direction in &self.directions {
            match settled.remove(direction) {
                Some(Ok(series)) => {
                    outcome.series.insert(direction.clone(), series);
                }
                Some(Err(failure)) => outcome.failures.push(failure),
                None => {}
            }
        }
        outcome
    }

    /// Heatmap over `directions` (defaults to every configured direction).
    pub async fn heatmap(
        &self,
        directions: Option<Vec<Direction>>,
        range: YearRange,
        use_log: bool,
    ) -> HeatmapView {
        let directions = directions.unwrap_or_else(|| self.directions.clone());
        let outcome = self.loader.load(&directions, range).await;
        let matrix = self.get_matrix(&outcome.series, &directions, &range.years(), use_log);

        HeatmapView { matrix, transform: Transform::from_use_log(use_log), failures: outcome.failures }
    }

    /// Ranking for `year` (latest year with data when `None`).
    ///
    /// Series are always loaded over the configured range; a year outside it
    /// ranks every direction at zero.
    pub async fn rankings(&self, year: Option<i32>, n: usize) -> RankingView {
        let year = match year {
            Some(year) => year,
            None => self.latest_year().await.unwrap_or(self.range.end),
        };

        if self.use_backend_rankings {
            match self.loader.source().fetch_rankings_for_year(year).await {
                Ok(mut entries) => {
                    entries.truncate(n);
                    return RankingView { year, entries, precomputed: true, failures: Vec::new() };
                }
                Err(e) if e.is_unsupported() => {}
                Err(e) => tracing::warn!(year, error = %e, "Backend ranking failed, ranking locally"),
            }
        }

        let outcome = self.loader.load(&self.directions, self.range).await;
        let entries = self.get_top_n(&outcome.series, &self.directions, year, n);
        RankingView { year, entries, precomputed: false, failures: outcome.failures }
    }

    /// Latest year with any non-zero count.
    pub async fn latest_year(&self) -> Option<i32> {
        match self.loader.source().latest_year().await {
            Ok(Some(year)) => return Some(year),
            Ok(None) => {}
            Err(e) if e.is_unsupported() => {}
            Err(e) => tracing::warn!(error = %e, "Backend latest year failed"),
        }

        let outcome = self.loader.load(&self.directions, self.range).await;
        outcome.series.last_active_year()
    }

    /// Select `year` on the board.
    ///
    /// Any earlier in-flight selection is superseded. The ranking is committed
    /// only if no newer selection or refresh started while it loaded.
    pub async fn select_year(&self, year: i32, n: usize) -> Result<BoardState, Superseded> {
        let ticket = self.generation.advance();
        let outcome = self.loader.load_guarded(&ticket, &self.directions, self.range).await?;
        let entries = self.get_top_n(&outcome.series, &self.directions, year, n);

        let mut board = self.board.write().await;
        let state = ticket.commit(BoardState { year, entries, generation: ticket.issued() })?;
        *board = Some(state.clone());
        tracing::info!(year, generation = state.generation, "Board updated");
        Ok(state)
    }

    /// Currently committed selection.
    pub async fn board(&self) -> Option<BoardState> {
        self.board.read().await.clone()
    }

    /// Clear cached data and discard in-flight selections.
    pub async fn refresh(&self) -> RefreshReport {
        let ticket = self.generation.advance();
        let cleared = self.loader.cache().settled_count().await;
        self.loader.clear().await;
        *self.board.write().await = None;

        let updated_at = Utc::now();
        *self.updated_at.write().await = Some(updated_at);
        tracing::info!(cleared, generation = ticket.issued(), "Dashboard refreshed");

        RefreshReport { status: "ok", cleared, generation: ticket.issued(), updated_at }
    }

    /// Time of the last refresh, if any.
    pub async fn updated_at(&self) -> Option<DateTime<Utc>> {
        *self.updated_at.read().await
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("directions", &self.directions.len())
            .field("range", &self.range)
            .field("loader", &self.loader)
            .finish()
    }
}
