//! Shared HTTP plumbing for the hosted backends.
//!
//! - Connection pooling via reqwest
//! - Transport retry middleware with exponential backoff
//! - Status code → [`SourceError`] mapping

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use url::Url;

use crate::config::{Config, defaults};
use crate::error::{SourceError, SourceResult};

/// JSON-over-HTTP fetcher.
#[derive(Clone)]
pub struct HttpFetcher {
    client: ClientWithMiddleware,
    request_timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, "application/json".parse()?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(defaults::MAX_KEEPALIVE)
            .pool_idle_timeout(defaults::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_millis(200), Duration::from_secs(5))
            .build_with_max_retries(config.transport_retries);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client, request_timeout: config.request_timeout })
    }

    /// GET `url` and return the body as untyped JSON.
    pub async fn get_value(&self, url: &Url) -> SourceResult<serde_json::Value> {
        tracing::debug!(%url, "GET");

        let response = self.client.get(url.as_str()).send().await.map_err(|e| self.map_send(e))?;
        let response = handle_response(response).await?;
        let bytes = response.bytes().await.map_err(|e| self.map_reqwest(e))?;

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// GET `url` and deserialize the body.
    pub async fn get_json<T>(&self, url: &Url) -> SourceResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let value = self.get_value(url).await?;
        serde_json::from_value(value).map_err(SourceError::from)
    }

    fn map_send(&self, err: reqwest_middleware::Error) -> SourceError {
        match err {
            reqwest_middleware::Error::Reqwest(e) => self.map_reqwest(e),
            other => SourceError::Middleware(other),
        }
    }

    fn map_reqwest(&self, err: reqwest::Error) -> SourceError {
        if err.is_timeout() { SourceError::Timeout(self.request_timeout) } else { SourceError::Http(err) }
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher").field("request_timeout", &self.request_timeout).finish()
    }
}

/// Handle response status codes.
async fn handle_response(response: reqwest::Response) -> SourceResult<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        429 => {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);

            Err(SourceError::rate_limited(retry_after))
        }
        // Object storage answers 403 for missing keys on public buckets.
        403 | 404 => Err(SourceError::not_found(response.url().path().to_string())),
        500..=599 => {
            let text = response.text().await.unwrap_or_default();
            Err(SourceError::server(status.as_u16(), text))
        }
        _ => {
            let text = response.text().await.unwrap_or_default();
            Err(SourceError::UnexpectedStatus { status: status.as_u16(), message: text })
        }
    }
}

/// Parse a base URL, making sure it ends in `/` so relative joins append.
pub fn base_url(raw: &str) -> SourceResult<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Append path segments to `base`, percent-encoding each one.
pub fn join_segments(base: &Url, segments: &[&str]) -> SourceResult<Url> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| SourceError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}
