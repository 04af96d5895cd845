//! Series loader: fetch, densify, cache.
//!
//! Failures are per direction. A load never aborts because one direction's
//! fetch failed; the failed direction is reported in [`LoadOutcome::failures`]
//! and is absent from the returned [`SeriesMap`].

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, BoxStream, StreamExt};

use super::cache::SeriesCache;
use super::generation::Ticket;
use crate::config::Config;
use crate::error::{DataUnavailable, SourceError, Superseded};
use crate::models::{Direction, Series, SeriesMap, YearRange, dedup_directions};
use crate::source::SeriesSource;

/// Upper bound on a server-requested retry wait.
const MAX_RETRY_WAIT: Duration = Duration::from_secs(5);

/// Retry policy for per-direction fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure.
    pub max_retries: u32,
    /// Delay before the first retry; doubles each time.
    pub backoff: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub const fn none() -> Self {
        Self { max_retries: 0, backoff: Duration::ZERO }
    }

    /// Delay before retry number `attempt` (1-based).
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(1u32 << attempt.saturating_sub(1).min(16))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 1, backoff: Duration::from_millis(250) }
    }
}

/// Result of a multi-direction load.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Successfully loaded directions.
    pub series: SeriesMap,
    /// Directions that could not be loaded, in request order.
    pub failures: Vec<DataUnavailable>,
}

impl LoadOutcome {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Directions that failed, in request order.
    #[must_use]
    pub fn failed_directions(&self) -> Vec<&Direction> {
        self.failures.iter().map(|f| &f.direction).collect()
    }
}

/// Loads dense series through a [`SeriesSource`], caching per `(direction, range)`.
#[derive(Clone)]
pub struct SeriesLoader {
    source: Arc<dyn SeriesSource>,
    cache: SeriesCache,
    retry: RetryPolicy,
    max_concurrency: usize,
}

impl SeriesLoader {
    #[must_use]
    pub fn new(source: Arc<dyn SeriesSource>, config: &Config) -> Self {
        Self {
            source,
            cache: SeriesCache::new(config.cache_max_size, config.cache_ttl),
            retry: RetryPolicy { max_retries: config.max_retries, backoff: config.retry_backoff },
            max_concurrency: config.max_concurrency.max(1),
        }
    }

    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn source(&self) -> &Arc<dyn SeriesSource> {
        &self.source
    }

    #[must_use]
    pub const fn cache(&self) -> &SeriesCache {
        &self.cache
    }

    /// Load every direction over `range`.
    pub async fn load(&self, directions: &[Direction], range: YearRange) -> LoadOutcome {
        let directions = dedup_directions(directions);
        let mut outcome = LoadOutcome::default();

        if range.is_empty() {
            outcome.series.extend(directions.into_iter().map(|d| (d, Series::default())));
            return outcome;
        }

        let mut missing = Vec::new();
        for direction in &directions {
            match self.cache.get(direction, range).await {
                Some(series) => {
                    tracing::debug!(%direction, %range, "Cache hit");
                    outcome.series.insert(direction.clone(), series);
                }
                None => missing.push(direction.clone()),
            }
        }

        if missing.is_empty() {
            return outcome;
        }

        let mut settled = self.fetch_bulk(&missing, range).await;
        if settled.is_empty() {
            settled = self.fetch_each(missing.clone(), range).collect().await;
        }

        // settle in request order regardless of arrival order
        let mut settled: std::collections::HashMap<Direction, Result<Series, DataUnavailable>> =
            settled.into_iter().collect();
        for direction in missing {
            match settled.remove(&direction) {
                Some(Ok(series)) => {
                    outcome.series.insert(direction, series);
                }
                Some(Err(failure)) => outcome.failures.push(failure),
                None => outcome.failures.push(DataUnavailable::new(
                    direction.clone(),
                    SourceError::not_found(format!("'{direction}' missing from response")),
                )),
            }
        }

        if !outcome.failures.is_empty() {
            tracing::warn!(
                loaded = outcome.series.len(),
                failed = outcome.failures.len(),
                %range,
                "Partial load"
            );
        }
        outcome
    }

    /// Load one direction.
    pub async fn load_one(
        &self,
        direction: &Direction,
        range: YearRange,
    ) -> Result<Series, DataUnavailable> {
        if range.is_empty() {
            return Ok(Series::default());
        }
        if let Some(series) = self.cache.get(direction, range).await {
            return Ok(series);
        }
        self.fetch_one(direction.clone(), range).await.1
    }

    /// Stream each direction's result as soon as it settles.
    ///
    /// Lets per-direction views render without waiting for the slowest fetch.
    pub fn load_each(
        &self,
        directions: &[Direction],
        range: YearRange,
    ) -> BoxStream<'static, (Direction, Result<Series, DataUnavailable>)> {
        let loader = self.clone();
        stream::iter(dedup_directions(directions))
            .map(move |direction| {
                let loader = loader.clone();
                async move {
                    let result = loader.load_one(&direction, range).await;
                    (direction, result)
                }
            })
            .buffer_unordered(self.max_concurrency)
            .boxed()
    }

    /// [`load`](Self::load), but only hand back the result if `ticket` is
    /// still current once it settles.
    pub async fn load_guarded(
        &self,
        ticket: &Ticket,
        directions: &[Direction],
        range: YearRange,
    ) -> Result<LoadOutcome, Superseded> {
        ticket.commit(())?;
        let outcome = self.load(directions, range).await;
        ticket.commit(outcome).inspect_err(|stale| {
            tracing::warn!(issued = stale.issued, current = stale.current, "Discarding stale load");
        })
    }

    /// Drop every cached series.
    pub async fn clear(&self) {
        self.cache.clear();
        self.source.invalidate().await;
        tracing::info!("Series cache cleared");
    }

    async fn fetch_bulk(
        &self,
        directions: &[Direction],
        range: YearRange,
    ) -> Vec<(Direction, Result<Series, DataUnavailable>)> {
        match self.source.fetch_bulk(directions, range).await {
            Ok(bulk) => {
                tracing::debug!(requested = directions.len(), returned = bulk.len(), "Bulk fetch");
                let mut settled = Vec::with_capacity(bulk.len());
                for (direction, raw) in bulk {
                    let series = Series::dense(&raw, range);
                    self.cache.insert(direction.clone(), range, series.clone()).await;
                    settled.push((direction, Ok(series)));
                }
                if settled.is_empty() {
                    // Nothing usable; per-direction fetches will report each failure.
                    tracing::debug!("Bulk fetch returned no requested directions");
                }
                settled
            }
            Err(e) if e.is_unsupported() => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Bulk fetch failed, falling back to per-direction");
                Vec::new()
            }
        }
    }

    fn fetch_each(
        &self,
        directions: Vec<Direction>,
        range: YearRange,
    ) -> BoxStream<'_, (Direction, Result<Series, DataUnavailable>)> {
        stream::iter(directions)
            .map(move |direction| self.fetch_one(direction, range))
            .buffer_unordered(self.max_concurrency)
            .boxed()
    }

    async fn fetch_one(
        &self,
        direction: Direction,
        range: YearRange,
    ) -> (Direction, Result<Series, DataUnavailable>) {
        let mut attempt = 0;
        loop {
            match self.source.fetch_series(&direction, range).await {
                Ok(raw) => {
                    let series = Series::dense(&raw, range);
                    self.cache.insert(direction.clone(), range, series.clone()).await;
                    tracing::debug!(%direction, %range, attempt, "Fetched series");
                    return (direction, Ok(series));
                }
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    let delay = e
                        .retry_after()
                        .map_or_else(|| self.retry.delay(attempt), |after| after.min(MAX_RETRY_WAIT));
                    tracing::debug!(%direction, error = %e, attempt, ?delay, "Retrying fetch");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::warn!(%direction, error = %e, "Series unavailable");
                    let failure = DataUnavailable::new(direction.clone(), e);
                    return (direction, Err(failure));
                }
            }
        }
    }
}

impl std::fmt::Debug for SeriesLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesLoader")
            .field("source", &self.source.name())
            .field("retry", &self.retry)
            .field("max_concurrency", &self.max_concurrency)
            .finish()
    }
}
