use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use routerfed_application::ports::{
    AdminClientFactory, AdminClientHandle, CacheCleanupOutcome, ClientCacheMaintenancePort,
    ClientCachePort,
};
use routerfed_domain::{AdminEndpoint, DomainError};
use tracing::{debug, info, warn};

struct CacheEntry {
    handle: Arc<dyn AdminClientHandle>,
    created_at: Instant,
}

impl CacheEntry {
    fn new(handle: Arc<dyn AdminClientHandle>) -> Self {
        Self {
            handle,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, max_live: Duration) -> bool {
        self.created_at.elapsed() >= max_live
    }
}

/// Keyed cache of admin clients, one live handle per address. Lookups,
/// invalidations, and the periodic expiry sweep may run concurrently; the
/// per-key entry lock keeps the one-live-handle invariant through any
/// interleaving. Evicted handles are closed here and nowhere else.
pub struct AdminClientCache {
    factory: Arc<dyn AdminClientFactory>,
    entries: DashMap<String, CacheEntry>,
    max_live: Duration,
    shut_down: AtomicBool,
}

impl AdminClientCache {
    pub fn new(factory: Arc<dyn AdminClientFactory>, max_live: Duration) -> Self {
        Self {
            factory,
            entries: DashMap::new(),
            max_live,
            shut_down: AtomicBool::new(false),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn close_quietly(handle: &Arc<dyn AdminClientHandle>) {
        if let Err(e) = handle.close() {
            warn!(endpoint = handle.address(), error = %e, "Ignoring close failure");
        }
    }
}

impl ClientCachePort for AdminClientCache {
    fn get_or_create(&self, address: &str) -> Result<Arc<dyn AdminClientHandle>, DomainError> {
        if self.shut_down.load(Ordering::Acquire) {
            return Err(DomainError::CacheShutDown);
        }

        let handle = match self.entries.entry(address.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired(self.max_live) {
                    let fresh = self.factory.create(address)?;
                    let stale = occupied.insert(CacheEntry::new(Arc::clone(&fresh)));
                    Self::close_quietly(&stale.handle);
                    fresh
                } else {
                    Arc::clone(&occupied.get().handle)
                }
            }
            Entry::Vacant(vacant) => {
                let fresh = self.factory.create(address)?;
                vacant.insert(CacheEntry::new(Arc::clone(&fresh)));
                fresh
            }
        };

        // A shutdown that raced the insert above must not leave a live
        // handle behind it.
        if self.shut_down.load(Ordering::Acquire) {
            self.invalidate(address);
            return Err(DomainError::CacheShutDown);
        }
        Ok(handle)
    }

    fn invalidate(&self, address: &str) {
        if let Some((_, entry)) = self.entries.remove(address) {
            debug!(endpoint = address, "Evicting cached admin client");
            Self::close_quietly(&entry.handle);
        }
    }

    fn warm(&self, endpoints: &[AdminEndpoint]) -> usize {
        let mut created = 0;
        for endpoint in endpoints.iter().filter(|e| !e.is_blank()) {
            match self.get_or_create(endpoint.address()) {
                Ok(_) => created += 1,
                Err(e) => {
                    warn!(endpoint = %endpoint, error = %e, "Failed to pre-build admin client");
                }
            }
        }
        created
    }
}

#[async_trait]
impl ClientCacheMaintenancePort for AdminClientCache {
    async fn run_cleanup_cycle(&self) -> Result<CacheCleanupOutcome, DomainError> {
        if self.shut_down.load(Ordering::Acquire) {
            return Ok(CacheCleanupOutcome::default());
        }

        let mut outcome = CacheCleanupOutcome::default();
        let mut expired = Vec::new();
        for entry in self.entries.iter() {
            outcome.scanned += 1;
            if entry.value().is_expired(self.max_live) {
                expired.push(entry.key().clone());
            }
        }

        for address in expired {
            // Re-check under the entry lock: a concurrent get_or_create may
            // already have swapped in a fresh client.
            if let Some((_, entry)) = self
                .entries
                .remove_if(&address, |_, entry| entry.is_expired(self.max_live))
            {
                Self::close_quietly(&entry.handle);
                outcome.evicted += 1;
            }
        }
        Ok(outcome)
    }

    async fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::AcqRel) {
            return;
        }

        let addresses: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        let mut closed = 0;
        for address in addresses {
            if let Some((_, entry)) = self.entries.remove(&address) {
                Self::close_quietly(&entry.handle);
                closed += 1;
            }
        }
        info!(closed, "Admin client cache shut down");
    }
}
