//! A single hosted bulk index file.
//!
//! The index is fetched on first use and memoised until [`SeriesSource::invalidate`].

use std::sync::Arc;

use tokio::sync::RwLock;
use url::Url;

use super::{BulkCounts, HttpFetcher, SeriesSource};
use crate::config::Config;
use crate::error::{SourceError, SourceResult};
use crate::models::{BulkSeries, Direction, YearCounts, YearRange};

/// Static index backend.
#[derive(Debug)]
pub struct StaticIndexSource {
    http: HttpFetcher,
    index_url: Url,
    index: RwLock<Option<Arc<BulkSeries>>>,
}

impl StaticIndexSource {
    /// `config.base_url` is the full URL of the index file.
    ///
    /// # Errors
    ///
    /// Returns error on an invalid URL or HTTP client failure.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            http: HttpFetcher::new(config)?,
            index_url: Url::parse(config.base_url.trim())?,
            index: RwLock::new(None),
        })
    }

    async fn index(&self) -> SourceResult<Arc<BulkSeries>> {
        if let Some(index) = self.index.read().await.as_ref() {
            return Ok(Arc::clone(index));
        }

        let mut slot = self.index.write().await;
        if let Some(index) = slot.as_ref() {
            return Ok(Arc::clone(index));
        }

        let fetched: BulkSeries = self.http.get_json(&self.index_url).await?;
        tracing::info!(
            directions = fetched.series.len(),
            url = %self.index_url,
            "Loaded static index"
        );
        let fetched = Arc::new(fetched);
        *slot = Some(Arc::clone(&fetched));
        Ok(fetched)
    }
}

#[async_trait::async_trait]
impl SeriesSource for StaticIndexSource {
    fn name(&self) -> &'static str {
        "static-index"
    }

    async fn fetch_series(
        &self,
        direction: &Direction,
        _range: YearRange,
    ) -> SourceResult<YearCounts> {
        self.index()
            .await?
            .year_counts(direction.as_str())
            .ok_or_else(|| SourceError::not_found(format!("'{direction}' in static index")))
    }

    async fn fetch_bulk(
        &self,
        directions: &[Direction],
        _range: YearRange,
    ) -> SourceResult<BulkCounts> {
        let index = self.index().await?;
        Ok(directions
            .iter()
            .filter_map(|d| index.year_counts(d.as_str()).map(|counts| (d.clone(), counts)))
            .collect())
    }

    async fn list_directions(&self) -> SourceResult<Vec<Direction>> {
        Ok(self.index().await?.listed_directions())
    }

    async fn invalidate(&self) {
        *self.index.write().await = None;
    }
}
