//! Session cache of loaded series.

use std::time::Duration;

use moka::future::Cache;

use crate::models::{Direction, Series, YearRange};

/// Process-scoped cache keyed by `(direction, range)`.
///
/// Entries are dense series for exactly the keyed range. Two concurrent loads
/// of the same key write identical values, so overwrites are harmless.
/// A zero capacity or TTL disables caching entirely.
#[derive(Clone)]
pub struct SeriesCache {
    inner: Option<Cache<(Direction, YearRange), Series>>,
}

impl SeriesCache {
    #[must_use]
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let inner = (max_capacity > 0 && !ttl.is_zero())
            .then(|| Cache::builder().max_capacity(max_capacity).time_to_live(ttl).build());
        Self { inner }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    pub async fn get(&self, direction: &Direction, range: YearRange) -> Option<Series> {
        self.inner.as_ref()?.get(&(direction.clone(), range)).await
    }

    pub async fn insert(&self, direction: Direction, range: YearRange, series: Series) {
        if let Some(inner) = &self.inner {
            inner.insert((direction, range), series).await;
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        if let Some(inner) = &self.inner {
            inner.invalidate_all();
        }
    }

    /// Approximate number of live entries.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.as_ref().map_or(0, Cache::entry_count)
    }

    /// Exact number of live entries, after pending maintenance has run.
    pub async fn settled_count(&self) -> u64 {
        match &self.inner {
            Some(inner) => {
                inner.run_pending_tasks().await;
                inner.entry_count()
            }
            None => 0,
        }
    }
}

impl std::fmt::Debug for SeriesCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesCache").field("entries", &self.entry_count()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearCount;

    #[tokio::test]
    async fn test_insert_get_clear() {
        let cache = SeriesCache::new(16, Duration::from_secs(60));
        let rl = Direction::new("rl");
        let range = YearRange::new(2010, 2011);
        let series = Series::from_points([YearCount::new(2010, 1), YearCount::new(2011, 2)]);

        assert!(cache.get(&rl, range).await.is_none());
        cache.insert(rl.clone(), range, series.clone()).await;
        assert_eq!(cache.get(&rl, range).await, Some(series));
        assert!(cache.get(&rl, YearRange::new(2010, 2012)).await.is_none());
        assert_eq!(cache.settled_count().await, 1);

        cache.clear();
        assert!(cache.get(&rl, range).await.is_none());
    }

    #[tokio::test]
    async fn test_zero_capacity_disables() {
        let cache = SeriesCache::new(0, Duration::from_secs(60));
        assert!(!cache.is_enabled());

        let rl = Direction::new("rl");
        let range = YearRange::new(2010, 2010);
        cache.insert(rl.clone(), range, Series::default()).await;
        assert!(cache.get(&rl, range).await.is_none());
        assert_eq!(cache.entry_count(), 0);
    }
}
