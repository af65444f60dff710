//! HTTP fetching for collection pages, API payloads, and media bytes.
//!
//! This module provides the [`Fetcher`], a thin wrapper over a shared
//! `reqwest::Client` with a bounded retry loop for transient failures.
//! All network traffic in the importer goes through it.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{ColligoError, Result};

/// Upper bound for the backoff delay between retries.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(8);

/// HTTP client configuration for fetching pages and assets.
///
/// This struct controls timeout, user agent, and retry settings for
/// HTTP requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
    /// Maximum number of retries after a transient failure.
    pub max_retries: u32,
    /// Delay before the first retry; doubles per attempt.
    pub retry_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Colligo/1.0; +https://github.com/stormlightlabs/colligo)"
                .to_string(),
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// Shared HTTP client for all importer traffic.
///
/// A Fetcher validates URLs, sends browser-like headers, maps timeouts to
/// [`ColligoError::Timeout`], and retries transient failures with
/// exponential backoff before giving up.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    /// Creates a Fetcher from the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(ColligoError::HttpError)?;

        Ok(Self { client, config })
    }

    /// Gets the configuration this Fetcher was built with.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches a URL and returns the response body as text.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.get(url).await?;
        Ok(response.text().await?)
    }

    /// Fetches a URL and returns the raw response bytes.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.get(url).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Fetches a URL and decodes the response body as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.get(url).await?;
        Ok(response.json().await?)
    }

    /// Performs a GET with retry, returning the successful response.
    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let parsed_url = Url::parse(url).map_err(|e| ColligoError::InvalidUrl(e.to_string()))?;

        if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
            return Err(ColligoError::InvalidUrl(
                "URL must include a scheme (http:// or https://)".to_string(),
            ));
        }

        let mut attempt = 0;
        let mut delay = self.config.retry_delay;

        loop {
            match self.send(parsed_url.clone()).await {
                Ok(response) => {
                    if attempt > 0 {
                        tracing::info!(attempts = attempt + 1, url = %parsed_url, "Request succeeded after retry");
                    }
                    return Ok(response);
                }
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        error = %e,
                        attempt = attempt,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis(),
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay = next_delay(delay);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send(&self, url: Url) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url.clone())
            .header("User-Agent", &self.config.user_agent)
            .header(
                "Accept",
                "text/html,application/json,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ColligoError::Timeout { timeout: self.config.timeout }
                } else {
                    ColligoError::HttpError(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ColligoError::HttpStatus { status: status.as_u16(), url: url.to_string() });
        }

        Ok(response)
    }
}

/// Doubles the backoff delay, capped at [`MAX_RETRY_DELAY`].
fn next_delay(delay: Duration) -> Duration {
    (delay * 2).min(MAX_RETRY_DELAY)
}
