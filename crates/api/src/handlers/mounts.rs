use axum::extract::State;
use axum::Json;
use tracing::{debug, instrument};

use crate::dto::MountTableResponse;
use crate::state::AppState;

#[instrument(skip(state), name = "api_get_mounts")]
pub async fn get_mounts(State(state): State<AppState>) -> Json<MountTableResponse> {
    let table = state.mount_table.current();

    debug!(entries = table.len(), "Mount table snapshot served");

    Json(MountTableResponse {
        count: table.len(),
        entries: table.entries.clone(),
    })
}
