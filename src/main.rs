//! Content Catalog - HTTP server entry point
//!
//! Serves cached category discovery, bounded category browse and bounded
//! search over a scan-only item table.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use content_catalog::api::{create_router, AppState};
use content_catalog::config::{Config, StoreBackend};
use content_catalog::store::{MemoryItemStore, RetryingItemStore, SharedItemStore};

/// Main entry point for the catalog server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the configured item store and wrap it with retries
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "content_catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Content Catalog Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, table={}, port={}, retry_attempts={}",
        config.store_backend, config.table_name, config.server_port, config.retry_max_attempts
    );

    let store = open_store(&config).await?;
    let state = AppState::from_store(store);
    info!("Item store initialized");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Opens the configured backend behind the retry decorator.
async fn open_store(config: &Config) -> anyhow::Result<SharedItemStore> {
    let policy = config.retry_policy();

    match config.store_backend {
        StoreBackend::Memory => {
            let store = match &config.seed_file {
                Some(path) => {
                    let store = MemoryItemStore::from_json_file(path)?;
                    info!("Seeded memory store with {} items from {}", store.len().await, path.display());
                    store
                }
                None => {
                    warn!("No SEED_FILE set, memory store starts empty");
                    MemoryItemStore::new()
                }
            };
            Ok(Arc::new(RetryingItemStore::new(store, policy)))
        }
        #[cfg(feature = "dynamodb")]
        StoreBackend::DynamoDb => {
            let store = content_catalog::store::DynamoItemStore::from_env(
                config.aws_region.clone(),
                config.table_name.clone(),
            )
            .await;
            info!("Scanning DynamoDB table {} in {}", config.table_name, config.aws_region);
            Ok(Arc::new(RetryingItemStore::new(store, policy)))
        }
        #[cfg(not(feature = "dynamodb"))]
        StoreBackend::DynamoDb => {
            anyhow::bail!("STORE_BACKEND=dynamodb requires building with the `dynamodb` feature")
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
