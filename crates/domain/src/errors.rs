use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Refresh rejected by {endpoint}")]
    RefreshRejected { endpoint: String },

    #[error("Admin transport error for {endpoint}: {detail}")]
    AdminTransport { endpoint: String, detail: String },

    #[error("Endpoint directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("Failed to load mount table: {0}")]
    MountTableLoad(String),

    #[error("Invalid mount entry: {0}")]
    InvalidMountEntry(String),

    #[error("Failed to close admin client for {endpoint}: {detail}")]
    ClientClose { endpoint: String, detail: String },

    #[error("Cache is shut down")]
    CacheShutDown,

    #[error("I/O error: {0}")]
    IoError(String),
}
