//! Periodic cache maintenance.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use super::controller::ConfigFileCache;

/// Handle for controlling a running sweeper.
pub struct SweeperHandle {
    /// Sender to signal shutdown.
    shutdown_tx: watch::Sender<bool>,
}

impl SweeperHandle {
    /// Signals the sweeper to stop.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Background task that runs [`ConfigFileCache::run_pending_tasks`] on a
/// fixed interval, so expired entries leave the index even when the cache
/// sees no traffic.
pub struct CacheSweeper {
    cache: ConfigFileCache,
    interval: Duration,
}

impl CacheSweeper {
    pub fn new(cache: ConfigFileCache, interval: Duration) -> Self {
        Self { cache, interval }
    }

    /// Sweeper using the cache's configured interval.
    pub fn from_settings(cache: ConfigFileCache) -> Self {
        let interval = cache.settings().sweep_interval();
        Self::new(cache, interval)
    }

    /// Starts the background sweep task.
    ///
    /// Returns a handle that can be used to stop the sweeper.
    pub fn start(self) -> SweeperHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = SweeperHandle { shutdown_tx };

        tokio::spawn(self.run(shutdown_rx));

        handle
    }

    /// Runs the sweep loop until shutdown. Returns the number of sweeps.
    async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> u64 {
        let mut timer = interval(self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!("Starting cache sweeper with interval {:?}", self.interval);
        let mut sweeps = 0;

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    self.cache.run_pending_tasks().await;
                    sweeps += 1;
                    debug!(
                        entries = self.cache.entry_count(),
                        index_rows = self.cache.index().row_count(),
                        "Cache sweep done"
                    );
                }
                result = shutdown_rx.changed() => {
                    if result.is_err() || *shutdown_rx.borrow() {
                        info!("Cache sweeper shutting down");
                        break;
                    }
                }
            }
        }

        sweeps
    }
}
