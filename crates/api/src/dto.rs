use routerfed_domain::MountEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MountTableResponse {
    pub count: usize,
    pub entries: Vec<MountEntry>,
}

#[derive(Debug, Serialize)]
pub struct RefreshTriggeredResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshLocalResponse {
    pub refreshed: bool,
}
