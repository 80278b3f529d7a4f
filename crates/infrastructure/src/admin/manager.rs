use std::sync::Arc;

use async_trait::async_trait;
use routerfed_application::ports::{ClientCachePort, MountTableManager};
use routerfed_domain::DomainError;
use tracing::debug;

use crate::mount_table::MountTableStore;

/// Manager for this router itself: a refresh is a reload of the local mount
/// table store, no network involved.
pub struct LocalMountTableManager {
    store: Arc<MountTableStore>,
}

impl LocalMountTableManager {
    pub fn new(store: Arc<MountTableStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MountTableManager for LocalMountTableManager {
    async fn refresh(&self) -> Result<bool, DomainError> {
        debug!("Refreshing local mount table");
        self.store.reload().await
    }
}

/// Manager for a remote router: acquires the endpoint's cached admin client
/// and asks it to reload. The client is fetched per call so an eviction
/// between cycles always yields a fresh connection.
pub struct RemoteMountTableManager {
    address: String,
    clients: Arc<dyn ClientCachePort>,
}

impl RemoteMountTableManager {
    pub fn new(address: String, clients: Arc<dyn ClientCachePort>) -> Self {
        Self { address, clients }
    }
}

#[async_trait]
impl MountTableManager for RemoteMountTableManager {
    async fn refresh(&self) -> Result<bool, DomainError> {
        let client = self.clients.get_or_create(&self.address)?;
        client.refresh_mount_table().await
    }
}
