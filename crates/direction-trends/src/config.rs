//! Configuration for direction-trends.

use std::path::PathBuf;
use std::time::Duration;

use crate::models::{MAX_YEAR, MIN_YEAR, SourceKind, YearRange};

/// Default constants.
pub mod defaults {
    use std::time::Duration;

    /// Bucket holding one `<slug>_<start>_<end>.json` file per direction.
    pub const OBJECT_STORE_URL: &str = "https://storage.googleapis.com/ai-trend-cache";

    /// Dashboard backend API.
    pub const API_URL: &str = "http://localhost:8000";

    /// Hosted bulk index file.
    pub const STATIC_INDEX_URL: &str =
        "https://storage.googleapis.com/ai-trend-cache/all_directions.json";

    /// First year covered by the hosted files.
    pub const START_YEAR: i32 = 2010;

    /// Last year covered by the hosted files.
    pub const END_YEAR: i32 = 2025;

    /// Directions shown in a ranking.
    pub const TOP_N: usize = 15;

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Cache TTL (1 hour). Hosted files change at most daily.
    pub const CACHE_TTL: Duration = Duration::from_secs(3600);

    /// Maximum cached `(direction, range)` entries.
    pub const CACHE_MAX_SIZE: u64 = 1024;

    /// Concurrent per-direction fetches.
    pub const MAX_CONCURRENCY: usize = 8;

    /// Loader-level retries per failed direction.
    pub const MAX_RETRIES: u32 = 1;

    /// First retry delay; doubles on each further attempt.
    pub const RETRY_BACKOFF: Duration = Duration::from_millis(250);

    /// Transport-level retries inside the HTTP client.
    pub const TRANSPORT_RETRIES: u32 = 2;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend kind.
    pub source: SourceKind,

    /// Base URL of the backend (bucket, API root, or index file URL).
    pub base_url: String,

    /// Local bulk JSON file for [`SourceKind::File`].
    pub data_file: Option<PathBuf>,

    /// Default first year.
    pub start_year: i32,

    /// Default last year.
    pub end_year: i32,

    /// Default ranking length.
    pub top_n: usize,

    /// Prefer rankings precomputed by the backend when it offers them.
    pub use_backend_rankings: bool,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cache size.
    pub cache_max_size: u64,

    /// Concurrent per-direction fetches.
    pub max_concurrency: usize,

    /// Loader-level retries per direction.
    pub max_retries: u32,

    /// First loader retry delay.
    pub retry_backoff: Duration,

    /// Transport-level retries inside the HTTP client.
    pub transport_retries: u32,
}

impl Config {
    /// Create a configuration for the given source, using its default URL
    /// when `base_url` is `None`.
    #[must_use]
    pub fn new(source: SourceKind, base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| Self::default_url(source).to_string());
        Self {
            source,
            base_url,
            data_file: None,
            start_year: defaults::START_YEAR,
            end_year: defaults::END_YEAR,
            top_n: defaults::TOP_N,
            use_backend_rankings: false,
            request_timeout: defaults::REQUEST_TIMEOUT,
            connect_timeout: defaults::CONNECT_TIMEOUT,
            cache_ttl: defaults::CACHE_TTL,
            cache_max_size: defaults::CACHE_MAX_SIZE,
            max_concurrency: defaults::MAX_CONCURRENCY,
            max_retries: defaults::MAX_RETRIES,
            retry_backoff: defaults::RETRY_BACKOFF,
            transport_retries: defaults::TRANSPORT_RETRIES,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            source: SourceKind::ObjectStore,
            base_url: base_url.to_string(),
            data_file: None,
            start_year: defaults::START_YEAR,
            end_year: defaults::END_YEAR,
            top_n: defaults::TOP_N,
            use_backend_rankings: false,
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            cache_ttl: Duration::from_secs(0), // No caching in tests
            cache_max_size: 0,
            max_concurrency: 4,
            max_retries: 1,
            retry_backoff: Duration::from_millis(0), // No delay in tests
            transport_retries: 0,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        let source = match std::env::var("TRENDS_SOURCE") {
            Ok(raw) => raw.parse::<SourceKind>().map_err(anyhow::Error::msg)?,
            Err(_) => SourceKind::default(),
        };
        let mut config = Self::new(source, std::env::var("TRENDS_BASE_URL").ok());

        config.data_file = std::env::var("TRENDS_DATA_FILE").ok().map(PathBuf::from);
        if let Some(year) = env_parse::<i32>("TRENDS_START_YEAR")? {
            config.start_year = year;
        }
        if let Some(year) = env_parse::<i32>("TRENDS_END_YEAR")? {
            config.end_year = year;
        }
        if let Some(n) = env_parse::<usize>("TRENDS_TOP_N")? {
            config.top_n = n;
        }
        if let Some(flag) = env_parse::<bool>("TRENDS_BACKEND_RANKINGS")? {
            config.use_backend_rankings = flag;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check values that would make every view misbehave.
    ///
    /// # Errors
    ///
    /// Returns error if the default year range leaves
    /// [`MIN_YEAR`]..=[`MAX_YEAR`] or is inverted.
    pub fn validate(&self) -> anyhow::Result<()> {
        let range = self.year_range();
        anyhow::ensure!(
            range.is_bounded(),
            "default years {range} must lie within {MIN_YEAR}..={MAX_YEAR}"
        );
        anyhow::ensure!(
            !range.is_empty(),
            "start year {} is after end year {}",
            range.start,
            range.end
        );
        Ok(())
    }

    /// Default base URL for a source kind.
    #[must_use]
    pub const fn default_url(source: SourceKind) -> &'static str {
        match source {
            SourceKind::ObjectStore | SourceKind::File => defaults::OBJECT_STORE_URL,
            SourceKind::Api => defaults::API_URL,
            SourceKind::StaticIndex => defaults::STATIC_INDEX_URL,
        }
    }

    /// Default year range for views.
    #[must_use]
    pub const fn year_range(&self) -> YearRange {
        YearRange::new(self.start_year, self.end_year)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(SourceKind::default(), None)
    }
}

fn env_parse<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("invalid {key}={raw:?}: {e}")),
        Err(_) => Ok(None),
    }
}
