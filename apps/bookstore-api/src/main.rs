//! Catalog server entry point.

use anyhow::Context;
use bookstore_api::config::ApiConfig;
use bookstore_api::{create_app, AppState};
use bookstore_db::{Database, DbConfig};
use tokio::signal;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting bookstore catalog server...");

    // 2. Load configuration
    let config = ApiConfig::load()?;
    info!(
        addr = %config.addr(),
        database = %config.database_path.display(),
        "Configuration loaded"
    );

    // 3. Open database (runs migrations)
    let db_config = DbConfig::new(&config.database_path).max_connections(config.max_connections);
    let db = Database::new(db_config)
        .await
        .context("failed to open catalog database")?;

    // 4. Build the application
    let app = create_app(AppState::new(db.clone()));

    // 5. Serve until SIGINT/SIGTERM
    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("failed to bind {}", config.addr()))?;
    info!(addr = %config.addr(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
