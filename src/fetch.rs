//! Bounded HTTP fetch used by the upstream clients
//!
//! Wraps a `reqwest::Client` with an explicit per-request timeout. Every
//! failure mode (connection, DNS, TLS, non-2xx status, body read) is logged
//! and collapsed into `None`, so a misbehaving upstream is reported as
//! "no data" rather than an error that could abort a refresh cycle.

use std::time::Duration;

use reqwest::Client;
use tracing::warn;

/// Timeout applied to every outbound request
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP fetcher with a bounded per-request timeout
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Creates a fetcher with the default 10 second timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a fetcher with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }

    /// Fetches the body of `url` as text
    ///
    /// # Arguments
    /// * `url` - Fully-formed request URL
    ///
    /// # Returns
    /// * `Some(String)` - The response body on a 2xx response
    /// * `None` - On any transport failure, non-2xx status, or unreadable
    ///   body; the failure is logged and the caller simply has no data
    ///   until the next scheduled cycle
    pub async fn fetch_text(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("request to {url} failed: {e}");
                return None;
            }
        };

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                warn!("request to {url} returned error status: {e}");
                return None;
            }
        };

        match response.text().await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("failed to read response body from {url}: {e}");
                None
            }
        }
    }
}
