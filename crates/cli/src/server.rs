use std::net::SocketAddr;

use axum::Router;
use routerfed_api::{create_api_routes, AppState};
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn start_admin_server(
    addr: SocketAddr,
    state: AppState,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let app = Router::new().nest("/api", create_api_routes(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Admin API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Received ctrl-c, shutting down");
                }
                _ = shutdown.cancelled() => {}
            }
        })
        .await?;
    Ok(())
}
