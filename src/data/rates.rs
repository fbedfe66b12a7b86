//! Exchange rate upstream client
//!
//! Fetches a table of rates relative to a base currency from a
//! Coinbase-style `/v2/exchange-rates` endpoint. Rates arrive as decimal
//! strings and are parsed to floats by the aggregator.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::fetch::HttpFetcher;

/// Base URL for the exchange rate API
const EXCHANGE_RATE_BASE_URL: &str = "https://api.coinbase.com/v2/exchange-rates";

/// Parsed rate table from the exchange rate upstream
#[derive(Debug, Clone, Deserialize)]
pub struct RateTable {
    /// Base currency the rates are relative to
    #[allow(dead_code)]
    pub currency: String,
    /// Quote currency code to decimal rate string
    pub rates: HashMap<String, String>,
}

/// Envelope wrapping the rate table in the upstream response
#[derive(Debug, Deserialize)]
struct RateEnvelope {
    data: RateTable,
}

/// Errors that can occur when fetching exchange rates
#[derive(Debug, Error)]
pub enum RatesError {
    /// The upstream returned no usable body
    #[error("rate upstream returned no data")]
    NoData,

    /// Failed to parse the JSON response
    #[error("failed to parse rate response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the exchange rate API
#[derive(Debug, Clone)]
pub struct RatesClient {
    fetcher: HttpFetcher,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl Default for RatesClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RatesClient {
    /// Creates a client against the default upstream
    pub fn new() -> Self {
        Self {
            fetcher: HttpFetcher::new(),
            base_url: EXCHANGE_RATE_BASE_URL.to_string(),
        }
    }

    /// Creates a client with a custom fetcher
    #[allow(dead_code)]
    pub fn with_fetcher(fetcher: HttpFetcher) -> Self {
        Self {
            fetcher,
            base_url: EXCHANGE_RATE_BASE_URL.to_string(),
        }
    }

    /// Overrides the base URL (for testing)
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the request URL for a base currency
    fn request_url(&self, base_currency: &str) -> String {
        format!("{}?currency={}", self.base_url, base_currency)
    }

    /// Fetches the rate table for the given base currency
    ///
    /// # Arguments
    /// * `base_currency` - Currency code the returned rates are relative to
    ///
    /// # Returns
    /// * `Ok(RateTable)` - The parsed rate table
    /// * `Err(RatesError)` - If the fetch produced no data or the body did
    ///   not match the expected envelope shape
    pub async fn fetch_rates(&self, base_currency: &str) -> Result<RateTable, RatesError> {
        let url = self.request_url(base_currency);
        let text = self
            .fetcher
            .fetch_text(&url)
            .await
            .ok_or(RatesError::NoData)?;
        let envelope: RateEnvelope = serde_json::from_str(&text)?;
        Ok(envelope.data)
    }
}
