use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// One mount table entry: a federation path mapped onto one or more target
/// nameservices. Order of `targets` is preference order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountEntry {
    pub path: String,
    pub targets: Vec<String>,
}

impl MountEntry {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.path.starts_with('/') {
            return Err(DomainError::InvalidMountEntry(format!(
                "mount path must be absolute: {:?}",
                self.path
            )));
        }
        if self.targets.iter().any(|t| t.trim().is_empty()) || self.targets.is_empty() {
            return Err(DomainError::InvalidMountEntry(format!(
                "mount {:?} needs at least one non-blank target",
                self.path
            )));
        }
        Ok(())
    }
}

/// Immutable snapshot of this router's mount table. Replaced wholesale on
/// refresh; readers keep whatever snapshot they already hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountTable {
    pub entries: Vec<MountEntry>,
}

impl MountTable {
    pub fn new(entries: Vec<MountEntry>) -> Result<Self, DomainError> {
        for entry in &entries {
            entry.validate()?;
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest-prefix match, the lookup routers serve reads with.
    pub fn resolve(&self, path: &str) -> Option<&MountEntry> {
        self.entries
            .iter()
            .filter(|e| {
                path == e.path
                    || (path.starts_with(&e.path)
                        && (e.path == "/" || path.as_bytes().get(e.path.len()) == Some(&b'/')))
            })
            .max_by_key(|e| e.path.len())
    }
}
