//! Tariff feed retrieval
//!
//! Bounded-time HTTP access to the published tariff document. The client
//! performs exactly one request per call: no retries (the scheduler's next
//! tick is the retry mechanism) and no caching (last-known-good handling
//! lives in the resolver).

use crate::config::FeedConfig;
use crate::logging::{StructuredLogger, get_logger};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failure kinds for a single feed retrieval
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response within the configured bound
    #[error("feed request timed out")]
    Timeout,

    /// Connection, DNS or TLS failure
    #[error("network failure: {0}")]
    Network(String),

    /// Non-2xx response status
    #[error("unexpected HTTP status {0}")]
    Http(u16),
}

/// Source of the raw tariff document
///
/// Seam between the driver and the network so refresh semantics can be
/// exercised without a live feed.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Retrieve the full tariff document as text
    async fn fetch_feed(&self) -> Result<String, FetchError>;
}

/// HTTP client for the published tariff document
pub struct FeedClient {
    url: String,
    timeout: Duration,
    logger: StructuredLogger,
}

impl FeedClient {
    /// Create a new feed client for a fixed URL
    pub fn new<S: Into<String>>(url: S, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            logger: get_logger("feed"),
        }
    }

    /// Create a feed client from configuration
    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(config.url.clone(), Duration::from_secs(config.timeout_secs))
    }

    /// URL this client fetches from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Perform one bounded-time GET of the feed and return the body as text
    pub async fn fetch(&self) -> Result<String, FetchError> {
        use reqwest::header::{ACCEPT, USER_AGENT};

        self.logger.debug(&format!("Fetching tariff feed from {}", self.url));

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let resp = client
            .get(&self.url)
            .header(ACCEPT, "application/xml, text/xml")
            .header(USER_AGENT, "hestia/1.0 (+https://github.com/)")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = resp.status();
        if !status.is_success() {
            self.logger
                .warn(&format!("Feed returned HTTP {}", status.as_u16()));
            return Err(FetchError::Http(status.as_u16()));
        }

        resp.text().await.map_err(map_reqwest_error)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(err.to_string())
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn fetch_feed(&self) -> Result<String, FetchError> {
        self.fetch().await
    }
}
