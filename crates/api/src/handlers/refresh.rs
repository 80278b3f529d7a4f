use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, instrument};

use crate::dto::{RefreshLocalResponse, RefreshTriggeredResponse};
use crate::errors::ApiError;
use crate::state::AppState;

/// Fleet-wide refresh. Fire-and-forget: the coordinator coalesces overlapping
/// triggers, so this always answers immediately.
#[instrument(skip(state), name = "api_trigger_refresh")]
pub async fn trigger_refresh(
    State(state): State<AppState>,
) -> (StatusCode, Json<RefreshTriggeredResponse>) {
    let trigger = Arc::clone(&state.refresh_trigger);
    tokio::spawn(async move {
        trigger.refresh().await;
    });

    (
        StatusCode::ACCEPTED,
        Json(RefreshTriggeredResponse {
            status: "triggered",
        }),
    )
}

/// Reload only this router's mount table. Remote coordinators call this on
/// their fan-out.
#[instrument(skip(state), name = "api_refresh_local")]
pub async fn refresh_local(
    State(state): State<AppState>,
) -> Result<Json<RefreshLocalResponse>, ApiError> {
    let refreshed = state.local_manager.refresh().await?;
    debug!(refreshed, "Local mount table refresh served");
    Ok(Json(RefreshLocalResponse { refreshed }))
}
