//! Static tables of tracked assets and rates
//!
//! The set of assets the server tracks is fixed at compile time, as is the
//! fallback price table substituted when every upstream fails.

use std::collections::HashMap;

/// A crypto asset tracked by the server
#[derive(Debug, Clone, Copy)]
pub struct TrackedAsset {
    /// Asset identifier used by the spot price upstream (e.g. "bitcoin")
    pub id: &'static str,
    /// Symbol published in the snapshot (e.g. "BTC")
    pub symbol: &'static str,
    /// Price substituted when every upstream fails
    pub fallback_usd: f64,
}

/// A fiat rate tracked by the server
#[derive(Debug, Clone, Copy)]
pub struct TrackedRate {
    /// Base currency the rate upstream is queried with
    pub base: &'static str,
    /// Quote currency looked up in the returned rate table
    pub quote: &'static str,
    /// Symbol published in the snapshot
    pub symbol: &'static str,
    /// Rate substituted when every upstream fails
    pub fallback: f64,
}

/// Crypto assets tracked by default
pub static TRACKED_ASSETS: [TrackedAsset; 7] = [
    TrackedAsset {
        id: "monero",
        symbol: "XMR",
        fallback_usd: 354.77,
    },
    TrackedAsset {
        id: "binancecoin",
        symbol: "BNB",
        fallback_usd: 634.98,
    },
    TrackedAsset {
        id: "bitcoin",
        symbol: "BTC",
        fallback_usd: 69763.00,
    },
    TrackedAsset {
        id: "dogecoin",
        symbol: "DOGE",
        fallback_usd: 0.1028,
    },
    TrackedAsset {
        id: "ripple",
        symbol: "XRP",
        fallback_usd: 1.47,
    },
    TrackedAsset {
        id: "polygon-ecosystem-token",
        symbol: "POL",
        fallback_usd: 0.1109,
    },
    TrackedAsset {
        id: "solana",
        symbol: "SOL",
        fallback_usd: 87.35,
    },
];

/// Fiat rates tracked by default
///
/// The EUR entry queries the rate upstream with EUR as the base currency and
/// consumes the USD entry of the returned table (USD per EUR).
pub static TRACKED_RATES: [TrackedRate; 1] = [TrackedRate {
    base: "EUR",
    quote: "USD",
    symbol: "EUR",
    fallback: 1.1865,
}];

/// Get all tracked crypto assets
pub fn all_assets() -> &'static [TrackedAsset] {
    &TRACKED_ASSETS
}

/// Get all tracked fiat rates
pub fn all_rates() -> &'static [TrackedRate] {
    &TRACKED_RATES
}

/// Builds the full fallback price table, one entry per tracked symbol
pub fn fallback_prices(assets: &[TrackedAsset], rates: &[TrackedRate]) -> HashMap<String, f64> {
    let mut prices = HashMap::with_capacity(assets.len() + rates.len());
    for asset in assets {
        prices.insert(asset.symbol.to_string(), asset.fallback_usd);
    }
    for rate in rates {
        prices.insert(rate.symbol.to_string(), rate.fallback);
    }
    prices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracked_assets_has_7_entries() {
        assert_eq!(TRACKED_ASSETS.len(), 7);
        assert_eq!(all_assets().len(), 7);
    }

    #[test]
    fn test_tracked_asset_symbols_are_unique() {
        let mut symbols: Vec<&str> = all_assets().iter().map(|a| a.symbol).collect();
        symbols.extend(all_rates().iter().map(|r| r.symbol));
        symbols.sort();
        let original_len = symbols.len();
        symbols.dedup();
        assert_eq!(symbols.len(), original_len, "Symbols are not unique");
    }

    #[test]
    fn test_tracked_asset_ids_are_unique() {
        let mut ids: Vec<&str> = all_assets().iter().map(|a| a.id).collect();
        ids.sort();
        let original_len = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), original_len, "Asset ids are not unique");
    }

    #[test]
    fn test_specific_asset_mappings() {
        let test_cases = [
            ("monero", "XMR", 354.77),
            ("binancecoin", "BNB", 634.98),
            ("bitcoin", "BTC", 69763.00),
            ("dogecoin", "DOGE", 0.1028),
            ("ripple", "XRP", 1.47),
            ("polygon-ecosystem-token", "POL", 0.1109),
            ("solana", "SOL", 87.35),
        ];

        for (id, expected_symbol, expected_fallback) in test_cases {
            let asset = all_assets()
                .iter()
                .find(|a| a.id == id)
                .unwrap_or_else(|| panic!("Asset {} not found", id));
            assert_eq!(asset.symbol, expected_symbol);
            assert!(
                (asset.fallback_usd - expected_fallback).abs() < 1e-9,
                "Asset {} fallback mismatch: expected {}, got {}",
                id,
                expected_fallback,
                asset.fallback_usd
            );
        }
    }

    #[test]
    fn test_eur_rate_orientation() {
        let rate = &all_rates()[0];
        assert_eq!(rate.base, "EUR");
        assert_eq!(rate.quote, "USD");
        assert_eq!(rate.symbol, "EUR");
        assert!((rate.fallback - 1.1865).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_prices_covers_every_tracked_symbol() {
        let fallback = fallback_prices(all_assets(), all_rates());
        assert_eq!(fallback.len(), 8);
        assert!((fallback["XMR"] - 354.77).abs() < 1e-9);
        assert!((fallback["BNB"] - 634.98).abs() < 1e-9);
        assert!((fallback["BTC"] - 69763.00).abs() < 1e-9);
        assert!((fallback["DOGE"] - 0.1028).abs() < 1e-9);
        assert!((fallback["XRP"] - 1.47).abs() < 1e-9);
        assert!((fallback["POL"] - 0.1109).abs() < 1e-9);
        assert!((fallback["SOL"] - 87.35).abs() < 1e-9);
        assert!((fallback["EUR"] - 1.1865).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_prices_with_empty_tables_is_empty() {
        let fallback = fallback_prices(&[], &[]);
        assert!(fallback.is_empty());
    }
}
