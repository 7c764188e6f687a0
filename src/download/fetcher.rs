//! HTTP fetching with bounded retries.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;

use crate::config::Config;
use crate::error::{Error, Result};

/// Source of media bytes.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the full body behind `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Plain HTTP GET fetcher.
///
/// Only transport failures (connect, timeout, interrupted body) are retried.
/// HTTP error statuses count as success with whatever body came back, since
/// media CDNs are permissive about what they serve.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_attempts: u32,
}

impl HttpFetcher {
    /// Create a fetcher.
    pub fn new(user_agent: &str, timeout: Duration, max_attempts: u32) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_attempts: max_attempts.max(1),
        })
    }

    /// Create a fetcher from the download options.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.options.user_agent,
            Duration::from_secs(config.options.request_timeout_seconds),
            config.options.max_request_retries,
        )
    }

    /// Number of attempts made per URL before giving up.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// One GET, reading the whole body.
    async fn get_once(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        tracing::debug!("GET {} -> {}", url, response.status());

        // Content-Length is whatever the server claims; grow as chunks arrive.
        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            body.extend_from_slice(&chunk?);
        }

        Ok(body)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        with_retries(url, self.max_attempts, |_| self.get_once(url)).await
    }
}

/// Run `attempt` up to `max_attempts` times, back to back, until it succeeds.
///
/// Exhaustion yields [`Error::Network`].
pub async fn with_retries<T, E, F, Fut>(url: &str, max_attempts: u32, mut attempt: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Display,
{
    let max_attempts = max_attempts.max(1);

    for n in 1..=max_attempts {
        match attempt(n).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::warn!(
                    "Error downloading {} (attempt {}/{}): {}",
                    url,
                    n,
                    max_attempts,
                    e
                );
            }
        }
    }

    Err(Error::Network {
        url: url.to_string(),
        attempts: max_attempts,
    })
}
