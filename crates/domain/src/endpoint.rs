use std::fmt;

use serde::{Deserialize, Serialize};

/// One router's administrative endpoint (`host:port`). The address is the
/// identity used for client caching and per-cycle task accounting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminEndpoint {
    address: String,
}

impl AdminEndpoint {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Blank addresses are dropped before a refresh cycle fans out.
    pub fn is_blank(&self) -> bool {
        self.address.trim().is_empty()
    }
}

impl fmt::Display for AdminEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

impl From<&str> for AdminEndpoint {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

/// Where a refresh task is routed. Resolved once per endpoint when the task
/// is built; an address containing the local marker skips the network and
/// reloads this router's own mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshTarget {
    Local,
    Remote(String),
}

impl RefreshTarget {
    pub fn resolve(endpoint: &AdminEndpoint, local_marker: &str) -> Self {
        if !local_marker.is_empty() && endpoint.address().contains(local_marker) {
            RefreshTarget::Local
        } else {
            RefreshTarget::Remote(endpoint.address().to_string())
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, RefreshTarget::Local)
    }
}

impl fmt::Display for RefreshTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshTarget::Local => write!(f, "local"),
            RefreshTarget::Remote(address) => write!(f, "{}", address),
        }
    }
}
