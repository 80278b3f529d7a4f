use std::sync::Arc;

use async_trait::async_trait;
use routerfed_domain::{DomainError, RefreshTarget};

/// Port for asking one router to reload its mount table.
#[async_trait]
pub trait MountTableManager: Send + Sync {
    /// One refresh attempt. `Ok(true)` means the router reloaded, `Ok(false)`
    /// means it declined. No internal retry either way.
    async fn refresh(&self) -> Result<bool, DomainError>;
}

/// Resolves a refresh target to the manager that can reach it. The local
/// target gets an in-process manager; remote targets get one bound to the
/// endpoint's admin address.
pub trait ManagerFactory: Send + Sync {
    fn manager(&self, target: &RefreshTarget) -> Arc<dyn MountTableManager>;
}
