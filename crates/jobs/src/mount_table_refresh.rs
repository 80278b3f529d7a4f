use std::sync::Arc;
use std::time::Duration;

use routerfed_application::ports::RefreshTrigger;
use tokio_util::sync::CancellationToken;
use tracing::info;

const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Periodic fleet-wide refresh trigger. Overlap with a manual trigger is
/// harmless: the coordinator coalesces concurrent cycles, so this job never
/// needs to know whether one is already running.
pub struct MountTableRefreshJob {
    trigger: Arc<dyn RefreshTrigger>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl MountTableRefreshJob {
    pub fn new(trigger: Arc<dyn RefreshTrigger>) -> Self {
        Self {
            trigger,
            interval: DEFAULT_REFRESH_INTERVAL,
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
        info!(interval_secs = self.interval.as_secs(), "Starting mount table refresh job");

        let job = Arc::clone(&self);
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(job.interval);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        info!("MountTableRefreshJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        job.trigger.refresh().await;
                    }
                }
            }
        });
    }
}
