use std::sync::Arc;
use std::time::Duration;

use routerfed_application::ports::ClientCacheMaintenancePort;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_millis(30_000);

/// Periodic expiry sweep over the admin client cache. Runs independently of
/// refresh cycles until cancelled.
pub struct ClientCacheCleanupJob {
    maintenance: Arc<dyn ClientCacheMaintenancePort>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl ClientCacheCleanupJob {
    pub fn new(maintenance: Arc<dyn ClientCacheMaintenancePort>) -> Self {
        Self {
            maintenance,
            interval: DEFAULT_CLEANUP_INTERVAL,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            "Starting client cache cleanup job"
        );

        let job = Arc::clone(&self);
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(job.interval);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        info!("ClientCacheCleanupJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match job.maintenance.run_cleanup_cycle().await {
                            Ok(outcome) => {
                                if outcome.evicted > 0 {
                                    info!(
                                        scanned = outcome.scanned,
                                        evicted = outcome.evicted,
                                        "Client cache cleanup cycle completed"
                                    );
                                }
                            }
                            Err(e) => {
                                error!(error = %e, "Client cache cleanup cycle failed");
                            }
                        }
                    }
                }
            }
        });
    }
}
