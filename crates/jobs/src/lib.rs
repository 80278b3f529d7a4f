pub mod client_cache_cleanup;
pub mod mount_table_refresh;
pub mod runner;

pub use client_cache_cleanup::ClientCacheCleanupJob;
pub use mount_table_refresh::MountTableRefreshJob;
pub use runner::JobRunner;
