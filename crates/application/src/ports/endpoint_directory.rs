use async_trait::async_trait;
use routerfed_domain::{AdminEndpoint, DomainError};

/// Port for discovering the federation's admin endpoints.
#[async_trait]
pub trait EndpointDirectory: Send + Sync {
    /// Current snapshot of known endpoints. The snapshot may be stale or
    /// empty; implementations must not block indefinitely.
    async fn list_endpoints(&self) -> Result<Vec<AdminEndpoint>, DomainError>;
}
