use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/mounts", get(handlers::get_mounts))
        .route("/refresh", post(handlers::trigger_refresh))
        .route("/refresh/local", post(handlers::refresh_local))
        .with_state(state)
}
