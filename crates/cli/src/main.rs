use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use routerfed_api::AppState;
use routerfed_domain::config::CliOverrides;
use routerfed_jobs::{ClientCacheCleanupJob, JobRunner, MountTableRefreshJob};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "routerfed")]
#[command(version)]
#[command(about = "RouterFed - federated router admin service with mount table refresh")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Admin API port
    #[arg(short = 'p', long)]
    admin_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Mount table file path
    #[arg(long)]
    mounts: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        admin_port: cli.admin_port,
        bind_address: cli.bind.clone(),
        mount_file: cli.mounts.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting RouterFed v{}", env!("CARGO_PKG_VERSION"));

    let services = di::Services::new(&config);

    // Boot with whatever mount table is on disk; an unreadable file leaves
    // the table empty until the first successful refresh.
    if let Err(e) = services.store.reload().await {
        warn!(error = %e, "Initial mount table load failed, starting empty");
    }

    match services.list_endpoints().await {
        Ok(endpoints) => {
            let created = services.warm_clients(&endpoints);
            info!(created, "Pre-built admin clients");
        }
        Err(e) => warn!(error = %e, "Skipping admin client pre-warm"),
    }

    let shutdown = CancellationToken::new();
    JobRunner::new()
        .with_mount_table_refresh(
            MountTableRefreshJob::new(services.refresh_trigger())
                .with_interval(Duration::from_secs(config.refresh.interval_secs)),
        )
        .with_client_cache_cleanup(
            ClientCacheCleanupJob::new(services.cache_maintenance())
                .with_interval(Duration::from_millis(config.refresh.cleanup_interval_ms)),
        )
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let app_state = AppState {
        refresh_trigger: services.refresh_trigger(),
        local_manager: services.local_manager(),
        mount_table: services.mount_table(),
    };

    let admin_addr: SocketAddr = format!(
        "{}:{}",
        config.server.bind_address, config.server.admin_port
    )
    .parse()?;
    server::start_admin_server(admin_addr, app_state, shutdown.clone()).await?;

    // Server exited: stop the jobs and release all cached clients.
    shutdown.cancel();
    services.shutdown().await;

    info!("Server shutdown complete");
    Ok(())
}
