use crate::error::{Result, UpstreamError};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// HTTP client for the upstream news site.
///
/// Built once at startup and shared across requests; reqwest pools
/// connections internally.
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent("DDCBC/0.1 (+https://ddcbc.ca)")
            .timeout(timeout)
            .connect_timeout(timeout / 2)
            .pool_max_idle_per_host(10)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch a single upstream page and return its body text.
    ///
    /// One GET, no retry. A non-2xx response is an error; the caller
    /// decides how to degrade.
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

impl Default for UpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}
