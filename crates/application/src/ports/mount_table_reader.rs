use std::sync::Arc;

use routerfed_domain::MountTable;

/// Port for reading this router's current mount table snapshot.
pub trait MountTableReader: Send + Sync {
    fn current(&self) -> Arc<MountTable>;
}
