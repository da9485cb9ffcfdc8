use doomstop::{router, storage::JsonFileStore, remote::RemoteSync, AppState, Config};
use std::{net::SocketAddr, sync::Arc};
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let store = JsonFileStore::open(&config.data_path).await;
    info!(path = %store.path().display(), "opened stats store");

    let remote = match RemoteSync::from_config(&config) {
        Ok(remote) => Some(remote),
        Err(err) => {
            warn!("remote service disabled: {err}");
            None
        }
    };

    let state = AppState::new(Arc::new(store), remote.clone());
    if let Some(remote) = &remote {
        info!(base_url = remote.base_url(), "loading loops from remote");
        let _ = remote.spawn_catalog_sync(Arc::clone(&state.catalog));
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
