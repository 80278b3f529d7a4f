use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FederationConfig {
    /// Admin addresses (`host:port`) of every router in the federation,
    /// including this one. An address containing the local marker is
    /// refreshed in-process instead of over the network.
    #[serde(default)]
    pub routers: Vec<String>,

    #[serde(default = "default_mount_file")]
    pub mount_file: String,
}

impl Default for FederationConfig {
    fn default() -> Self {
        Self {
            routers: Vec::new(),
            mount_file: default_mount_file(),
        }
    }
}

fn default_mount_file() -> String {
    "mounts.toml".to_string()
}
