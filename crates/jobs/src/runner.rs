use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{ClientCacheCleanupJob, MountTableRefreshJob};

pub trait SpawnableJob: Send + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()>;
}

macro_rules! impl_spawnable_job {
    ($t:ty) => {
        impl SpawnableJob for $t {
            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
                tokio::spawn(async move { self.start().await })
            }
        }
    };
}

impl_spawnable_job!(MountTableRefreshJob);
impl_spawnable_job!(ClientCacheCleanupJob);

fn spawn_job<J: SpawnableJob>(job: Option<J>, shutdown: &Option<CancellationToken>) {
    if let Some(job) = job {
        let job = match shutdown {
            Some(token) => job.with_cancellation(token.clone()),
            None => job,
        };
        Arc::new(job).start_job();
    }
}

pub struct JobRunner {
    mount_table_refresh: Option<MountTableRefreshJob>,
    client_cache_cleanup: Option<ClientCacheCleanupJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            mount_table_refresh: None,
            client_cache_cleanup: None,
            shutdown: None,
        }
    }

    pub fn with_mount_table_refresh(mut self, job: MountTableRefreshJob) -> Self {
        self.mount_table_refresh = Some(job);
        self
    }

    pub fn with_client_cache_cleanup(mut self, job: ClientCacheCleanupJob) -> Self {
        self.client_cache_cleanup = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self) {
        info!("Starting background job runner");

        spawn_job(self.mount_table_refresh, &self.shutdown);
        spawn_job(self.client_cache_cleanup, &self.shutdown);

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
