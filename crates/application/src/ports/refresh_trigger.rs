use async_trait::async_trait;

/// Fire-and-forget entry point for a fleet-wide refresh. Callable from any
/// number of tasks at once; overlapping triggers coalesce into the running
/// cycle.
#[async_trait]
pub trait RefreshTrigger: Send + Sync {
    async fn refresh(&self);
}
