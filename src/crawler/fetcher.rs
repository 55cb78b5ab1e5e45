//! HTTP fetcher for per-region listing pages
//!
//! One GET per region per cycle, with a fixed browser header set and a
//! bounded per-request timeout. No retries: a failed region waits for the
//! next scheduled cycle.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::headers::build_browser_headers;
use super::PageSource;
use crate::config::{RefreshConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::utils::error::FetchError;

/// Fetcher for `{base_url}/concursos/{uf}/` listing pages
#[derive(Debug, Clone)]
pub struct RegionFetcher {
    /// HTTP client with default headers, timeout and compression
    client: Client,

    /// Source site root, without trailing slash
    base_url: String,

    /// Per-request timeout, reported in timeout errors
    timeout: Duration,
}

impl RegionFetcher {
    /// Create a fetcher for the public source site with default settings
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the HTTP client cannot be created
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(DEFAULT_BASE_URL, DEFAULT_USER_AGENT, Duration::from_secs(30))
    }

    /// Create a fetcher from the refresh section of the configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the base URL or user agent is invalid
    pub fn from_config(config: &RefreshConfig) -> Result<Self, FetchError> {
        Self::with_config(
            &config.base_url,
            &config.user_agent,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Create a fetcher against a custom base URL, e.g. a mock server
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the base URL is invalid
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        Self::with_config(base_url, DEFAULT_USER_AGENT, Duration::from_secs(30))
    }

    /// Create a fetcher with custom configuration
    ///
    /// # Arguments
    ///
    /// * `base_url` - Source site root
    /// * `user_agent` - User agent sent with every request
    /// * `timeout` - Request timeout duration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the client cannot be created
    pub fn with_config(
        base_url: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        Url::parse(base_url)
            .map_err(|e| FetchError::Client(format!("invalid base URL '{base_url}': {e}")))?;

        let client = Client::builder()
            .default_headers(build_browser_headers(user_agent)?)
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Listing page URL for a region
    pub fn region_url(&self, uf: &str) -> String {
        format!("{}/concursos/{uf}/", self.base_url)
    }

    /// Fetch one region's listing page
    ///
    /// # Errors
    ///
    /// Returns `FetchError::HttpStatus` for non-2xx responses and
    /// `FetchError::Network` for connection failures, timeouts and body
    /// read failures.
    pub async fn fetch_listing(&self, uf: &str) -> Result<String, FetchError> {
        let url = self.region_url(uf);
        tracing::debug!(uf = %uf, url = %url, "Fetching listing page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                code: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::network(format!("timed out after {}s", self.timeout.as_secs()))
        } else {
            FetchError::network(err)
        }
    }
}

#[async_trait]
impl PageSource for RegionFetcher {
    async fn fetch(&self, uf: &str) -> Result<String, FetchError> {
        self.fetch_listing(uf).await
    }
}
