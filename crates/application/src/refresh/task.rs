use std::sync::Arc;
use std::time::{Duration, Instant};

use routerfed_domain::{AdminEndpoint, DomainError, RefreshOutcome};
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::debug;

use crate::ports::MountTableManager;

/// One unit of fan-out work: a single refresh call against a single
/// endpoint's manager, bounded by the cycle's per-task budget.
pub struct RefreshTask {
    endpoint: AdminEndpoint,
    manager: Arc<dyn MountTableManager>,
}

/// Settled result of a [`RefreshTask`]. Each task settles exactly once; the
/// coordinator tallies results only after every task has one.
pub struct TaskResult {
    pub endpoint: AdminEndpoint,
    pub outcome: RefreshOutcome,
    pub elapsed: Duration,
}

impl RefreshTask {
    pub fn new(endpoint: AdminEndpoint, manager: Arc<dyn MountTableManager>) -> Self {
        Self { endpoint, manager }
    }

    pub fn endpoint(&self) -> &AdminEndpoint {
        &self.endpoint
    }

    /// Invoke the manager exactly once. The budget covers queueing for a
    /// fan-out permit as well as the call itself, so a cycle's join never
    /// waits past budget + scheduling slack for any one task. On timeout the
    /// in-flight call is dropped; a late completion has nothing left to
    /// report into.
    pub async fn run(self, fan_out: Arc<Semaphore>, budget: Duration) -> TaskResult {
        let Self { endpoint, manager } = self;
        let start = Instant::now();

        let attempt = async {
            let _permit = fan_out
                .acquire_owned()
                .await
                .map_err(|e| DomainError::IoError(e.to_string()))?;
            manager.refresh().await
        };

        let outcome = match timeout(budget, attempt).await {
            Ok(Ok(true)) => RefreshOutcome::Success,
            Ok(Ok(false)) => RefreshOutcome::Failure(DomainError::RefreshRejected {
                endpoint: endpoint.address().to_string(),
            }),
            Ok(Err(e)) => RefreshOutcome::Failure(e),
            Err(_) => RefreshOutcome::Timeout,
        };

        let elapsed = start.elapsed();
        debug!(
            endpoint = %endpoint,
            elapsed_ms = elapsed.as_millis() as u64,
            outcome = ?outcome,
            "Refresh task settled"
        );

        TaskResult {
            endpoint,
            outcome,
            elapsed,
        }
    }
}
