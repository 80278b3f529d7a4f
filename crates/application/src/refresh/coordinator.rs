use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use routerfed_domain::{AdminEndpoint, CycleSummary, DomainError, RefreshOutcome, RefreshTarget};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::ports::{ClientCachePort, EndpointDirectory, ManagerFactory, RefreshTrigger};
use crate::refresh::task::RefreshTask;

const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_millis(10_000);
const DEFAULT_LOCAL_MARKER: &str = "local";

/// Coordinates one fleet-wide mount table refresh: fans a bounded set of
/// concurrent tasks out over every known endpoint, waits for all of them to
/// settle, evicts the cached client of every endpoint that did not succeed,
/// and emits the summary log lines. At most one cycle runs at a time;
/// triggers that arrive while a cycle is in flight return immediately.
pub struct RefreshCoordinator {
    directory: Arc<dyn EndpointDirectory>,
    managers: Arc<dyn ManagerFactory>,
    client_cache: Arc<dyn ClientCachePort>,
    task_timeout: Duration,
    local_marker: String,
    fan_out: Arc<Semaphore>,
    in_progress: AtomicBool,
}

impl RefreshCoordinator {
    pub fn new(
        directory: Arc<dyn EndpointDirectory>,
        managers: Arc<dyn ManagerFactory>,
        client_cache: Arc<dyn ClientCachePort>,
    ) -> Self {
        Self {
            directory,
            managers,
            client_cache,
            task_timeout: DEFAULT_TASK_TIMEOUT,
            local_marker: DEFAULT_LOCAL_MARKER.to_string(),
            fan_out: Arc::new(Semaphore::new(default_fan_out())),
            in_progress: AtomicBool::new(false),
        }
    }

    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = timeout;
        self
    }

    pub fn with_local_marker(mut self, marker: impl Into<String>) -> Self {
        self.local_marker = marker.into();
        self
    }

    /// Fan-out width. 0 keeps the default of one task per CPU.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        if max_concurrent > 0 {
            self.fan_out = Arc::new(Semaphore::new(max_concurrent));
        }
        self
    }

    /// Run one refresh cycle, or nothing if a cycle is already in flight.
    /// Returns `None` for the coalesced no-op case so callers and tests can
    /// tell the two apart without scraping logs.
    pub async fn run_cycle(&self) -> Option<CycleSummary> {
        let _gate = CycleGate::acquire(&self.in_progress)?;

        let endpoints = self.list_refreshable_endpoints().await;
        if endpoints.is_empty() {
            debug!("No refreshable endpoints, skipping fan-out");
            return Some(CycleSummary {
                success_count: 0,
                failure_count: 0,
                first_failure: None,
            });
        }

        let outcomes = self.invoke_refresh(&endpoints).await;
        let summary = CycleSummary::tally(outcomes.iter());

        for (endpoint, outcome) in endpoints.iter().zip(&outcomes) {
            if !outcome.is_success() {
                // Evict so the next cycle reconnects instead of reusing a
                // client that just failed.
                self.client_cache.invalidate(endpoint.address());
            }
        }

        if let Some(kind) = summary.first_failure {
            info!("{}", kind.advisory());
        }
        info!("{}", summary);
        Some(summary)
    }

    async fn list_refreshable_endpoints(&self) -> Vec<AdminEndpoint> {
        let endpoints = match self.directory.list_endpoints().await {
            Ok(endpoints) => endpoints,
            Err(e) => {
                warn!(error = %e, "Endpoint directory unavailable, refresh cycle degrades to empty");
                Vec::new()
            }
        };
        endpoints.into_iter().filter(|e| !e.is_blank()).collect()
    }

    /// Fan out one task per endpoint and wait for every task to settle. The
    /// per-task timeout bounds each join, so the whole wait is bounded even
    /// when an endpoint hangs.
    async fn invoke_refresh(&self, endpoints: &[AdminEndpoint]) -> Vec<RefreshOutcome> {
        let mut handles = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            let target = RefreshTarget::resolve(endpoint, &self.local_marker);
            let manager = self.managers.manager(&target);
            let task = RefreshTask::new(endpoint.clone(), manager);
            let fan_out = Arc::clone(&self.fan_out);
            let budget = self.task_timeout;
            handles.push(tokio::spawn(task.run(fan_out, budget)));
        }

        let settled = futures::future::join_all(handles).await;

        let mut outcomes = Vec::with_capacity(settled.len());
        for (endpoint, joined) in endpoints.iter().zip(settled) {
            let outcome = match joined {
                Ok(result) => result.outcome,
                Err(e) => {
                    warn!(endpoint = %endpoint, error = %e, "Refresh task aborted");
                    RefreshOutcome::Failure(DomainError::IoError(e.to_string()))
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }
}

#[async_trait]
impl RefreshTrigger for RefreshCoordinator {
    async fn refresh(&self) {
        self.run_cycle().await;
    }
}

fn default_fan_out() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(4)
}

/// Single-flight gate over the coordinator. Only the caller that wins the
/// compare-and-set runs a cycle; the drop impl clears the flag on every exit
/// path, so an aborted cycle can never wedge future triggers.
struct CycleGate<'a> {
    flag: &'a AtomicBool,
}

impl<'a> CycleGate<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then_some(Self { flag })
    }
}

impl Drop for CycleGate<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
