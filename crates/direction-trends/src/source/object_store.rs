//! One hosted JSON file per direction.
//!
//! Layout: `{base}/{slug}_{start}_{end}.json` holding `{ "<year>": count }`.

use url::Url;

use super::{HttpFetcher, SeriesSource, base_url, join_segments};
use crate::config::Config;
use crate::error::SourceResult;
use crate::models::{Direction, YearCounts, YearRange, parse_year_counts};

/// Object-storage bucket backend.
#[derive(Debug, Clone)]
pub struct ObjectStoreSource {
    http: HttpFetcher,
    base: Url,
}

impl ObjectStoreSource {
    /// # Errors
    ///
    /// Returns error on an invalid base URL or HTTP client failure.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self { http: HttpFetcher::new(config)?, base: base_url(&config.base_url)? })
    }

    /// URL of the file holding `direction` for `range`.
    pub fn object_url(&self, direction: &Direction, range: YearRange) -> SourceResult<Url> {
        let file = format!("{}_{}_{}.json", direction, range.start, range.end);
        join_segments(&self.base, &[&file])
    }
}

#[async_trait::async_trait]
impl SeriesSource for ObjectStoreSource {
    fn name(&self) -> &'static str {
        "object-store"
    }

    async fn fetch_series(
        &self,
        direction: &Direction,
        range: YearRange,
    ) -> SourceResult<YearCounts> {
        let url = self.object_url(direction, range)?;
        let value = self.http.get_value(&url).await?;
        parse_year_counts(&value)
    }
}
