use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;
use routerfed_application::ports::MountTableReader;
use routerfed_domain::{DomainError, MountTable};
use tracing::info;

use super::loader::load_mount_file;

/// This router's mount table, swapped wholesale on reload so lookups never
/// block behind a refresh. A failed reload keeps the previous snapshot.
pub struct MountTableStore {
    current: ArcSwap<MountTable>,
    source: PathBuf,
}

impl MountTableStore {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            current: ArcSwap::from_pointee(MountTable::default()),
            source: source.into(),
        }
    }

    pub async fn reload(&self) -> Result<bool, DomainError> {
        let source = self.source.clone();
        let table = tokio::task::spawn_blocking(move || load_mount_file(&source))
            .await
            .map_err(|e| DomainError::MountTableLoad(e.to_string()))??;

        let entries = table.len();
        self.current.store(Arc::new(table));
        info!(entries, "Mount table reloaded");
        Ok(true)
    }
}

impl MountTableReader for MountTableStore {
    fn current(&self) -> Arc<MountTable> {
        self.current.load_full()
    }
}
