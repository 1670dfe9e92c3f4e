//! # Velora Store API
//!
//! HTTP server binary: wires configuration, the database handle and the
//! service state, then serves the router until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use velora_db::{Database, DbConfig};
use velora_store_api::{routes, ApiConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(true)
        .init();

    info!("Starting Velora store API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.http_port,
        db_path = %config.database_path,
        policy = ?config.subgroup_delete_policy,
        "Configuration loaded"
    );

    // Connect to the database and run migrations
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Connected to SQLite, migrations complete");

    // Create shared state and the router
    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    let state = Arc::new(AppState::new(db, config));
    let app = routes::router(state);

    info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
