use std::sync::Arc;

use routerfed_application::ports::{MountTableManager, MountTableReader, RefreshTrigger};

#[derive(Clone)]
pub struct AppState {
    /// Fleet-wide refresh entry point (the coordinator).
    pub refresh_trigger: Arc<dyn RefreshTrigger>,
    /// This router's own reload path, what peers call into.
    pub local_manager: Arc<dyn MountTableManager>,
    pub mount_table: Arc<dyn MountTableReader>,
}
