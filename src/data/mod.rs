//! Core data models for the price cache server
//!
//! This module contains the cached snapshot type plus the upstream clients
//! and their ephemeral parse results.

pub mod assets;
pub mod rates;
pub mod spot;

pub use assets::{all_assets, all_rates, fallback_prices, TrackedAsset, TrackedRate};
pub use rates::{RateTable, RatesClient, RatesError};
pub use spot::{SpotPriceClient, SpotPriceError, SpotPrices, SpotQuote};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The cached artifact served over HTTP
///
/// One snapshot is built per refresh cycle and atomically replaces the
/// previous cache contents. `last_update` is opaque text for human and log
/// inspection; it is stamped when the snapshot is built and never parsed
/// back, so a cache file carrying arbitrary timestamp text still reads
/// cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// Flat mapping of symbol (e.g. "BTC", "EUR") to USD price
    pub prices: HashMap<String, f64>,
    /// When the snapshot was built
    pub last_update: String,
}

impl PriceSnapshot {
    /// Builds a snapshot from a price mapping, stamped with the current time
    pub fn new(prices: HashMap<String, f64>) -> Self {
        Self {
            prices,
            last_update: chrono::Utc::now().to_rfc3339(),
        }
    }
}
