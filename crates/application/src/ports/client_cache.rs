use std::sync::Arc;

use async_trait::async_trait;
use routerfed_domain::{AdminEndpoint, DomainError};

/// A cached, reusable connection to one router's admin endpoint. Owned by
/// the client cache; nothing outside the cache closes it.
#[async_trait]
pub trait AdminClientHandle: Send + Sync {
    fn address(&self) -> &str;

    /// One refresh call against this endpoint's admin API.
    async fn refresh_mount_table(&self) -> Result<bool, DomainError>;

    /// Release the underlying connection. Closing twice is a no-op.
    fn close(&self) -> Result<(), DomainError>;
}

/// Port for constructing admin clients, so the cache never bakes in a
/// transport.
pub trait AdminClientFactory: Send + Sync {
    fn create(&self, address: &str) -> Result<Arc<dyn AdminClientHandle>, DomainError>;
}

/// Port for the keyed admin client cache.
pub trait ClientCachePort: Send + Sync {
    /// Cached handle for `address`, building one if absent or expired. At
    /// most one live handle per address survives concurrent calls.
    fn get_or_create(&self, address: &str) -> Result<Arc<dyn AdminClientHandle>, DomainError>;

    /// Remove and close the entry for `address`. No-op when absent. The next
    /// `get_or_create` rebuilds a fresh connection.
    fn invalidate(&self, address: &str);

    /// Pre-build clients for the given endpoints. Returns how many were
    /// created; failures are skipped, not fatal.
    fn warm(&self, endpoints: &[AdminEndpoint]) -> usize;
}

/// Outcome of one cleanup sweep over the client cache.
#[derive(Debug, Default, Clone)]
pub struct CacheCleanupOutcome {
    pub scanned: usize,
    pub evicted: usize,
}

/// Port for the expiry sweep and lifecycle of the client cache.
#[async_trait]
pub trait ClientCacheMaintenancePort: Send + Sync {
    /// Remove and close every entry older than the configured max live time.
    async fn run_cleanup_cycle(&self) -> Result<CacheCleanupOutcome, DomainError>;

    /// Stop the cache and close all remaining handles. Idempotent.
    async fn shutdown(&self);
}
