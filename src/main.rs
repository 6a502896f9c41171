//! Service binary: configuration, storage selection, startup, serving.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use darzi::config::{AppConfig, StorageMode};
use darzi::server::{AppState, build_router};
use darzi::storage::{FileStore, MongoStore, Store};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn Store> = match config.storage_mode {
        StorageMode::Mongo => {
            let uri = config
                .mongodb_uri
                .as_deref()
                .context("MONGODB_URI is required in mongo storage mode")?;
            let store = MongoStore::connect(uri, &config.mongodb_db).await?;
            store.ensure_indexes().await?;
            tracing::info!(database = %config.mongodb_db, "Using MongoDB storage");
            Arc::new(store)
        }
        StorageMode::File => {
            tracing::info!(path = %config.data_file.display(), "Using flat-file storage");
            Arc::new(FileStore::new(config.data_file.clone()))
        }
    };

    // Explicit first-run initialization, instead of seeding lazily on the
    // first product-type read.
    store.ensure_default_product_types().await?;

    let app = build_router(AppState { store }, &config.public_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
