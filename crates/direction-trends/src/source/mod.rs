//! Data sources for raw per-direction yearly counts.
//!
//! Every backend implements [`SeriesSource`]. Only `fetch_series` is
//! mandatory; the bulk, ranking and listing operations default to
//! [`SourceError::Unsupported`] so callers can fall back.

mod api;
mod http;
mod memory;
mod object_store;
mod static_index;

pub use api::ApiSource;
pub use http::{HttpFetcher, base_url, join_segments};
pub use memory::MemorySource;
pub use object_store::ObjectStoreSource;
pub use static_index::StaticIndexSource;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::aggregate::RankedEntry;
use crate::config::Config;
use crate::error::{SourceError, SourceResult};
use crate::models::{Direction, SourceKind, YearCounts, YearRange};

/// Raw counts for several directions.
pub type BulkCounts = BTreeMap<Direction, YearCounts>;

/// Capability to fetch raw yearly counts.
#[async_trait::async_trait]
pub trait SeriesSource: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Sparse or dense year → count mapping for one direction.
    async fn fetch_series(&self, direction: &Direction, range: YearRange)
    -> SourceResult<YearCounts>;

    /// Counts for many directions in one round trip.
    ///
    /// Directions the backend does not know are simply absent from the map.
    async fn fetch_bulk(
        &self,
        _directions: &[Direction],
        _range: YearRange,
    ) -> SourceResult<BulkCounts> {
        Err(SourceError::unsupported("fetch_bulk"))
    }

    /// Rankings precomputed by the backend, highest first.
    async fn fetch_rankings_for_year(&self, _year: i32) -> SourceResult<Vec<RankedEntry>> {
        Err(SourceError::unsupported("fetch_rankings_for_year"))
    }

    /// Latest year the backend has data for.
    async fn latest_year(&self) -> SourceResult<Option<i32>> {
        Err(SourceError::unsupported("latest_year"))
    }

    /// Directions the backend knows about.
    async fn list_directions(&self) -> SourceResult<Vec<Direction>> {
        Err(SourceError::unsupported("list_directions"))
    }

    /// Forget anything memoised on the source side.
    async fn invalidate(&self) {}
}

/// Build the source selected by `config`.
///
/// # Errors
///
/// Returns error if the base URL is invalid, the HTTP client cannot be built,
/// or the local data file cannot be read.
pub fn build_source(config: &Config) -> anyhow::Result<Arc<dyn SeriesSource>> {
    let source: Arc<dyn SeriesSource> = match config.source {
        SourceKind::ObjectStore => Arc::new(ObjectStoreSource::new(config)?),
        SourceKind::Api => Arc::new(ApiSource::new(config)?),
        SourceKind::StaticIndex => Arc::new(StaticIndexSource::new(config)?),
        SourceKind::File => {
            let path = config
                .data_file
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("the file source needs --data-file"))?;
            Arc::new(MemorySource::from_file(path)?)
        }
    };

    tracing::info!(source = source.name(), base_url = %config.base_url, "Data source ready");
    Ok(source)
}
