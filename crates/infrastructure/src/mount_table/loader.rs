use std::path::Path;

use routerfed_domain::{DomainError, MountEntry, MountTable};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct MountFile {
    #[serde(default)]
    mount: Vec<MountEntry>,
}

/// Parse a mount file:
///
/// ```toml
/// [[mount]]
/// path = "/data"
/// targets = ["ns1", "ns2"]
/// ```
pub fn load_mount_file(path: &Path) -> Result<MountTable, DomainError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| DomainError::MountTableLoad(format!("{}: {}", path.display(), e)))?;
    let parsed: MountFile =
        toml::from_str(&contents).map_err(|e| DomainError::MountTableLoad(e.to_string()))?;
    MountTable::new(parsed.mount)
}
