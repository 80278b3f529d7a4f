#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use routerfed_application::ports::{
    CacheCleanupOutcome, ClientCacheMaintenancePort, RefreshTrigger,
};
use routerfed_domain::DomainError;

#[derive(Default)]
pub struct MockRefreshTrigger {
    call_count: AtomicU64,
}

impl MockRefreshTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RefreshTrigger for MockRefreshTrigger {
    async fn refresh(&self) {
        self.call_count.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Default)]
pub struct MockCacheMaintenance {
    cleanup_count: AtomicU64,
    shutdown_count: AtomicU64,
    should_fail: AtomicBool,
    evicted_per_cycle: AtomicU64,
}

impl MockCacheMaintenance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_evicted_per_cycle(self, evicted: u64) -> Self {
        self.evicted_per_cycle.store(evicted, Ordering::Relaxed);
        self
    }

    pub fn cleanup_count(&self) -> u64 {
        self.cleanup_count.load(Ordering::Relaxed)
    }

    pub fn shutdown_count(&self) -> u64 {
        self.shutdown_count.load(Ordering::Relaxed)
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl ClientCacheMaintenancePort for MockCacheMaintenance {
    async fn run_cleanup_cycle(&self) -> Result<CacheCleanupOutcome, DomainError> {
        self.cleanup_count.fetch_add(1, Ordering::Relaxed);
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::IoError("cleanup failed".to_string()));
        }
        let evicted = self.evicted_per_cycle.load(Ordering::Relaxed) as usize;
        Ok(CacheCleanupOutcome {
            scanned: evicted,
            evicted,
        })
    }

    async fn shutdown(&self) {
        self.shutdown_count.fetch_add(1, Ordering::Relaxed);
    }
}
