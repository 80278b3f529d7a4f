use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefreshConfig {
    /// Period of the automatic fleet-wide refresh job.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Budget for one endpoint's refresh call. A task that has not settled
    /// by then is recorded as timed out and the cycle moves on.
    #[serde(default = "default_task_timeout_ms")]
    pub task_timeout_ms: u64,

    /// Age at which a cached admin client is evicted and closed.
    #[serde(default = "default_client_max_live_ms")]
    pub client_max_live_ms: u64,

    /// Period of the client cache cleanup sweep.
    #[serde(default = "default_cleanup_interval_ms")]
    pub cleanup_interval_ms: u64,

    /// Substring marking an address as this router itself.
    #[serde(default = "default_local_marker")]
    pub local_marker: String,

    /// Fan-out width of one refresh cycle. 0 means one task per CPU.
    #[serde(default)]
    pub max_concurrent: usize,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            task_timeout_ms: default_task_timeout_ms(),
            client_max_live_ms: default_client_max_live_ms(),
            cleanup_interval_ms: default_cleanup_interval_ms(),
            local_marker: default_local_marker(),
            max_concurrent: 0,
        }
    }
}

fn default_interval_secs() -> u64 {
    60
}

fn default_task_timeout_ms() -> u64 {
    10_000
}

fn default_client_max_live_ms() -> u64 {
    30_000
}

fn default_cleanup_interval_ms() -> u64 {
    30_000
}

fn default_local_marker() -> String {
    "local".to_string()
}
