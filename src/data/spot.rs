//! Spot price upstream client
//!
//! Fetches USD spot prices for a fixed set of asset ids from a
//! CoinGecko-style `/simple/price` endpoint and parses the response into
//! a map of asset id to quote.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::fetch::HttpFetcher;

/// Base URL for the spot price API
const SPOT_PRICE_BASE_URL: &str = "https://api.coingecko.com/api/v3/simple/price";

/// One asset's quote from the spot price upstream
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SpotQuote {
    /// USD price
    pub usd: f64,
}

/// Parsed spot price response, keyed by upstream asset id (e.g. "bitcoin")
pub type SpotPrices = HashMap<String, SpotQuote>;

/// Errors that can occur when fetching spot prices
#[derive(Debug, Error)]
pub enum SpotPriceError {
    /// The upstream returned no usable body
    #[error("spot price upstream returned no data")]
    NoData,

    /// Failed to parse the JSON response
    #[error("failed to parse spot price response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the spot price API
#[derive(Debug, Clone)]
pub struct SpotPriceClient {
    fetcher: HttpFetcher,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl Default for SpotPriceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SpotPriceClient {
    /// Creates a client against the default upstream
    pub fn new() -> Self {
        Self {
            fetcher: HttpFetcher::new(),
            base_url: SPOT_PRICE_BASE_URL.to_string(),
        }
    }

    /// Creates a client with a custom fetcher
    #[allow(dead_code)]
    pub fn with_fetcher(fetcher: HttpFetcher) -> Self {
        Self {
            fetcher,
            base_url: SPOT_PRICE_BASE_URL.to_string(),
        }
    }

    /// Overrides the base URL (for testing)
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the request URL for a set of asset ids
    fn request_url(&self, ids: &[&str]) -> String {
        format!(
            "{}?ids={}&vs_currencies=usd",
            self.base_url,
            ids.join(",")
        )
    }

    /// Fetches USD spot prices for the given asset ids
    ///
    /// # Arguments
    /// * `ids` - Upstream asset ids to query (comma-joined into the URL)
    ///
    /// # Returns
    /// * `Ok(SpotPrices)` - Parsed quotes; ids the upstream did not return
    ///   are simply absent from the map
    /// * `Err(SpotPriceError)` - If the fetch produced no data or the body
    ///   did not match the expected shape
    pub async fn fetch_spot_prices(&self, ids: &[&str]) -> Result<SpotPrices, SpotPriceError> {
        let url = self.request_url(ids);
        let text = self
            .fetcher
            .fetch_text(&url)
            .await
            .ok_or(SpotPriceError::NoData)?;
        let prices: SpotPrices = serde_json::from_str(&text)?;
        Ok(prices)
    }
}
