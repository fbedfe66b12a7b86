//! Background refresh loop
//!
//! Runs the aggregator on a fixed interval in a single background task, the
//! only writer to the cache store. The task sleeps the full interval between
//! cycles, so two cycles never overlap. A shutdown channel makes the loop
//! cancellable.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::aggregator::PriceAggregator;

/// Configuration for the refresh loop
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Time slept between refresh cycles
    pub interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300), // 5 minutes
        }
    }
}

/// Handle for controlling the background refresh task
pub struct RefreshHandle {
    /// Flag to signal shutdown
    shutdown_tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Creates a new RefreshHandle and spawns the background refresh task
    ///
    /// The task runs one refresh immediately so a fresh deployment serves
    /// data without waiting a full interval, then sleeps `config.interval`
    /// between subsequent cycles.
    ///
    /// # Arguments
    /// * `config` - Refresh interval configuration
    /// * `aggregator` - The aggregator driven by the loop
    pub fn spawn(config: RefreshConfig, aggregator: PriceAggregator) -> Self {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        tokio::spawn(async move {
            aggregator.refresh_once().await;

            loop {
                tokio::select! {
                    _ = tokio::time::sleep(config.interval) => {
                        aggregator.refresh_once().await;
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
        });

        Self { shutdown_tx }
    }

    /// Shuts down the background refresh task
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}
