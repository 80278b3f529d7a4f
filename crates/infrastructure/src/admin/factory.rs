use std::sync::Arc;

use routerfed_application::ports::{ClientCachePort, ManagerFactory, MountTableManager};
use routerfed_domain::RefreshTarget;

use super::manager::{LocalMountTableManager, RemoteMountTableManager};

/// Production manager factory: one shared local manager, and per-address
/// remote managers backed by the admin client cache.
pub struct AdminManagerFactory {
    local: Arc<LocalMountTableManager>,
    clients: Arc<dyn ClientCachePort>,
}

impl AdminManagerFactory {
    pub fn new(local: Arc<LocalMountTableManager>, clients: Arc<dyn ClientCachePort>) -> Self {
        Self { local, clients }
    }
}

impl ManagerFactory for AdminManagerFactory {
    fn manager(&self, target: &RefreshTarget) -> Arc<dyn MountTableManager> {
        match target {
            RefreshTarget::Local => Arc::clone(&self.local) as Arc<dyn MountTableManager>,
            RefreshTarget::Remote(address) => Arc::new(RemoteMountTableManager::new(
                address.clone(),
                Arc::clone(&self.clients),
            )),
        }
    }
}
