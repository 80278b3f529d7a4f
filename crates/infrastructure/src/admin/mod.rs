mod client;
mod client_cache;
mod factory;
mod manager;

pub use client::{HttpAdminClient, HttpAdminClientFactory};
pub use client_cache::AdminClientCache;
pub use factory::AdminManagerFactory;
pub use manager::{LocalMountTableManager, RemoteMountTableManager};
