//! Dashboard backend API.
//!
//! Endpoints:
//! - `GET /api/directions`
//! - `GET /api/direction/{name}`
//! - `GET /api/all-directions`
//! - `GET /api/rankings/{year}`
//! - `GET /api/rankings/latest`

use url::Url;

use super::{BulkCounts, HttpFetcher, SeriesSource, base_url, join_segments};
use crate::aggregate::RankedEntry;
use crate::config::Config;
use crate::error::SourceResult;
use crate::models::{
    BulkSeries, Direction, DirectionSeriesResponse, LatestRankings, RankingRow, YearCounts,
    YearRange,
};

/// Backend API client.
#[derive(Debug, Clone)]
pub struct ApiSource {
    http: HttpFetcher,
    base: Url,
}

impl ApiSource {
    /// # Errors
    ///
    /// Returns error on an invalid base URL or HTTP client failure.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self { http: HttpFetcher::new(config)?, base: base_url(&config.base_url)? })
    }

    fn endpoint(&self, segments: &[&str]) -> SourceResult<Url> {
        let mut all = Vec::with_capacity(segments.len() + 1);
        all.push("api");
        all.extend_from_slice(segments);
        join_segments(&self.base, &all)
    }
}

fn into_entries(rows: Vec<RankingRow>) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = rows
        .into_iter()
        .map(|row| RankedEntry { direction: row.direction, count: row.count })
        .collect();
    // backend order is usually sorted already; enforce it without disturbing ties
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

#[async_trait::async_trait]
impl SeriesSource for ApiSource {
    fn name(&self) -> &'static str {
        "api"
    }

    async fn fetch_series(
        &self,
        direction: &Direction,
        _range: YearRange,
    ) -> SourceResult<YearCounts> {
        let url = self.endpoint(&["direction", direction.as_str()])?;
        let response: DirectionSeriesResponse = self.http.get_json(&url).await?;
        response.into_year_counts()
    }

    async fn fetch_bulk(
        &self,
        directions: &[Direction],
        _range: YearRange,
    ) -> SourceResult<BulkCounts> {
        let url = self.endpoint(&["all-directions"])?;
        let bulk: BulkSeries = self.http.get_json(&url).await?;

        Ok(directions
            .iter()
            .filter_map(|d| bulk.year_counts(d.as_str()).map(|counts| (d.clone(), counts)))
            .collect())
    }

    async fn fetch_rankings_for_year(&self, year: i32) -> SourceResult<Vec<RankedEntry>> {
        let url = self.endpoint(&["rankings", &year.to_string()])?;
        let rows: Vec<RankingRow> = self.http.get_json(&url).await?;
        Ok(into_entries(rows))
    }

    async fn latest_year(&self) -> SourceResult<Option<i32>> {
        let url = self.endpoint(&["rankings", "latest"])?;
        let latest: LatestRankings = self.http.get_json(&url).await?;
        Ok(latest.latest_year)
    }

    async fn list_directions(&self) -> SourceResult<Vec<Direction>> {
        let url = self.endpoint(&["directions"])?;
        self.http.get_json(&url).await
    }
}
