use std::sync::Arc;
use std::time::Duration;

use routerfed_application::ports::{
    ClientCacheMaintenancePort, ClientCachePort, EndpointDirectory, MountTableManager,
    MountTableReader, RefreshTrigger,
};
use routerfed_application::RefreshCoordinator;
use routerfed_domain::{AdminEndpoint, Config, DomainError};
use routerfed_infrastructure::admin::{
    AdminClientCache, AdminManagerFactory, HttpAdminClientFactory, LocalMountTableManager,
};
use routerfed_infrastructure::directory::StaticEndpointDirectory;
use routerfed_infrastructure::mount_table::MountTableStore;

/// Build the whole object graph from config once, at startup.
pub struct Services {
    pub store: Arc<MountTableStore>,
    cache: Arc<AdminClientCache>,
    directory: Arc<StaticEndpointDirectory>,
    local_manager: Arc<LocalMountTableManager>,
    coordinator: Arc<RefreshCoordinator>,
}

impl Services {
    pub fn new(config: &Config) -> Self {
        let store = Arc::new(MountTableStore::new(&config.federation.mount_file));

        let client_factory = Arc::new(HttpAdminClientFactory::new(Duration::from_millis(
            config.refresh.task_timeout_ms,
        )));
        let cache = Arc::new(AdminClientCache::new(
            client_factory,
            Duration::from_millis(config.refresh.client_max_live_ms),
        ));

        let local_manager = Arc::new(LocalMountTableManager::new(Arc::clone(&store)));
        let managers = Arc::new(AdminManagerFactory::new(
            Arc::clone(&local_manager),
            Arc::clone(&cache) as Arc<dyn ClientCachePort>,
        ));

        let directory = Arc::new(StaticEndpointDirectory::new(&config.federation.routers));

        let coordinator = Arc::new(
            RefreshCoordinator::new(
                Arc::clone(&directory) as Arc<dyn EndpointDirectory>,
                managers,
                Arc::clone(&cache) as Arc<dyn ClientCachePort>,
            )
            .with_task_timeout(Duration::from_millis(config.refresh.task_timeout_ms))
            .with_local_marker(config.refresh.local_marker.clone())
            .with_max_concurrent(config.refresh.max_concurrent),
        );

        Self {
            store,
            cache,
            directory,
            local_manager,
            coordinator,
        }
    }

    pub fn refresh_trigger(&self) -> Arc<dyn RefreshTrigger> {
        Arc::clone(&self.coordinator) as Arc<dyn RefreshTrigger>
    }

    pub fn cache_maintenance(&self) -> Arc<dyn ClientCacheMaintenancePort> {
        Arc::clone(&self.cache) as Arc<dyn ClientCacheMaintenancePort>
    }

    pub fn local_manager(&self) -> Arc<dyn MountTableManager> {
        Arc::clone(&self.local_manager) as Arc<dyn MountTableManager>
    }

    pub fn mount_table(&self) -> Arc<dyn MountTableReader> {
        Arc::clone(&self.store) as Arc<dyn MountTableReader>
    }

    pub async fn list_endpoints(&self) -> Result<Vec<AdminEndpoint>, DomainError> {
        self.directory.list_endpoints().await
    }

    pub fn warm_clients(&self, endpoints: &[AdminEndpoint]) -> usize {
        self.cache.warm(endpoints)
    }

    pub async fn shutdown(&self) {
        self.cache.shutdown().await;
    }
}
