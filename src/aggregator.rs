//! Price aggregation and refresh
//!
//! Merges the two upstream results into a single flat snapshot, substitutes
//! the static fallback table when both upstreams fail entirely, and persists
//! the result through the cache store. No path in this module fails; every
//! upstream problem is absorbed into fewer keys or the full fallback set.

use std::collections::HashMap;

use futures::future;
use tracing::{error, info, warn};

use crate::cache::CacheStore;
use crate::data::{
    all_assets, all_rates, fallback_prices, PriceSnapshot, RateTable, RatesClient,
    SpotPriceClient, SpotPrices, TrackedAsset, TrackedRate,
};

/// Builds price snapshots from the upstream clients and persists them
///
/// The tracked-asset and tracked-rate tables are held explicitly by the
/// aggregator rather than read from globals, so tests can run it against
/// reduced tables.
pub struct PriceAggregator {
    spot: SpotPriceClient,
    rates: RatesClient,
    store: CacheStore,
    assets: Vec<TrackedAsset>,
    fiat: Vec<TrackedRate>,
}

impl PriceAggregator {
    /// Creates an aggregator tracking the default asset and rate tables
    pub fn new(store: CacheStore) -> Self {
        Self::with_tables(store, all_assets().to_vec(), all_rates().to_vec())
    }

    /// Creates an aggregator with explicit tables
    pub fn with_tables(
        store: CacheStore,
        assets: Vec<TrackedAsset>,
        fiat: Vec<TrackedRate>,
    ) -> Self {
        Self {
            spot: SpotPriceClient::new(),
            rates: RatesClient::new(),
            store,
            assets,
            fiat,
        }
    }

    /// Replaces the upstream clients (for redirecting base URLs in tests)
    #[allow(dead_code)]
    pub fn with_clients(mut self, spot: SpotPriceClient, rates: RatesClient) -> Self {
        self.spot = spot;
        self.rates = rates;
        self
    }

    /// Runs one refresh cycle: fetch both upstreams, merge, persist
    ///
    /// The two upstreams are queried concurrently and independently; neither
    /// result depends on the other's success. A failed fetch or parse is
    /// logged and treated as no data. A cache write failure is logged and
    /// the cycle's result is dropped on disk, leaving the previous file
    /// contents authoritative. The built snapshot is returned either way.
    pub async fn refresh_once(&self) -> PriceSnapshot {
        let ids: Vec<&str> = self.assets.iter().map(|asset| asset.id).collect();
        let base = self.fiat.first().map(|rate| rate.base).unwrap_or("EUR");

        let (spot_result, rate_result) = future::join(
            self.spot.fetch_spot_prices(&ids),
            self.rates.fetch_rates(base),
        )
        .await;

        let spot = match spot_result {
            Ok(prices) => Some(prices),
            Err(e) => {
                warn!("spot price upstream unavailable: {e}");
                None
            }
        };
        let rates = match rate_result {
            Ok(table) => Some(table),
            Err(e) => {
                warn!("rate upstream unavailable: {e}");
                None
            }
        };

        let snapshot = self.merge(spot, rates);
        info!("refreshed {} prices", snapshot.prices.len());

        if let Err(e) = self.store.write(&snapshot) {
            error!(
                "failed to write snapshot to {}: {e}",
                self.store.path().display()
            );
        }

        snapshot
    }

    /// Merges parsed upstream data into a snapshot
    ///
    /// Tracked assets present in the spot result are projected to their
    /// output symbols; absent ids are omitted, never defaulted. Each fiat
    /// rate is taken from the quote currency entry of the rate table and
    /// parsed from its decimal string. Only when the merged mapping ends up
    /// empty is it replaced wholesale by the fallback table; partial
    /// upstream success is never backfilled.
    pub fn merge(&self, spot: Option<SpotPrices>, rates: Option<RateTable>) -> PriceSnapshot {
        let mut prices = HashMap::new();

        if let Some(spot) = spot {
            for asset in &self.assets {
                if let Some(quote) = spot.get(asset.id) {
                    prices.insert(asset.symbol.to_string(), quote.usd);
                }
            }
        }

        if let Some(table) = rates {
            for rate in &self.fiat {
                match table.rates.get(rate.quote) {
                    Some(raw) => match raw.parse::<f64>() {
                        Ok(value) => {
                            prices.insert(rate.symbol.to_string(), value);
                        }
                        Err(_) => {
                            warn!("rate for {} is not a number: {raw:?}", rate.quote);
                        }
                    },
                    None => {
                        warn!("rate table has no {} entry", rate.quote);
                    }
                }
            }
        }

        if prices.is_empty() {
            prices = fallback_prices(&self.assets, &self.fiat);
        }

        PriceSnapshot::new(prices)
    }
}
