//! Coincache - price caching HTTP server
//!
//! Periodically fetches cryptocurrency spot prices and a fiat exchange rate
//! from two upstream APIs, caches the merged snapshot on disk, and serves it
//! over HTTP.

mod aggregator;
mod cache;
mod cli;
mod data;
mod fetch;
mod refresh;
mod server;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use aggregator::PriceAggregator;
use cache::CacheStore;
use cli::{Cli, Settings};
use refresh::{RefreshConfig, RefreshHandle};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli)?;

    let store = CacheStore::with_path(settings.cache_file.clone());
    info!("cache file: {}", settings.cache_file.display());

    let aggregator = PriceAggregator::new(store.clone());
    let refresh = RefreshHandle::spawn(
        RefreshConfig {
            interval: settings.refresh_interval,
        },
        aggregator,
    );

    let app = server::router(store);
    server::serve(app, settings.port).await?;

    refresh.shutdown().await;
    Ok(())
}
