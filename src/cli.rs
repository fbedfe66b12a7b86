//! Command-line interface and runtime settings
//!
//! This module parses CLI arguments (each with an environment variable
//! fallback) using clap and resolves them into the `Settings` used to wire
//! up the server.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::cache;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The refresh interval must be at least one second
    #[error("invalid refresh interval: {0} seconds (must be at least 1)")]
    InvalidInterval(u64),
}

/// Coincache - serve a periodically refreshed price snapshot over HTTP
#[derive(Parser, Debug)]
#[command(name = "coincache")]
#[command(about = "Price caching HTTP server for cryptocurrency and fiat rates")]
#[command(version)]
pub struct Cli {
    /// Port to listen on
    #[arg(long, env = "COINCACHE_PORT", default_value_t = 3040)]
    pub port: u16,

    /// Seconds between refresh cycles
    #[arg(long, value_name = "SECONDS", env = "COINCACHE_REFRESH_SECS", default_value_t = 300)]
    pub refresh_secs: u64,

    /// Path of the snapshot cache file
    #[arg(long, value_name = "PATH", env = "COINCACHE_CACHE_FILE")]
    pub cache_file: Option<PathBuf>,
}

/// Resolved runtime settings derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Settings {
    /// Port the HTTP facade listens on
    pub port: u16,
    /// Time between refresh cycles
    pub refresh_interval: Duration,
    /// Snapshot file location
    pub cache_file: PathBuf,
}

impl Settings {
    /// Creates Settings from parsed CLI arguments
    ///
    /// # Returns
    /// * `Ok(Settings)` with defaults filled in
    /// * `Err(CliError)` if the refresh interval is zero
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.refresh_secs == 0 {
            return Err(CliError::InvalidInterval(cli.refresh_secs));
        }

        Ok(Self {
            port: cli.port,
            refresh_interval: Duration::from_secs(cli.refresh_secs),
            cache_file: cli
                .cache_file
                .clone()
                .unwrap_or_else(cache::default_path),
        })
    }
}
