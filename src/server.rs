//! HTTP server initialization and runtime setup.
//!
//! Handles the store connection, listen address bootstrap, and the Axum
//! server lifecycle.

use crate::application::services::resolve_listen_addr;
use crate::config::{Config, StoreBackend};
use crate::domain::repositories::KeyValueStore;
use crate::infrastructure::store::{MemoryStore, RedisStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;

/// Installs the process-wide Prometheus recorder and describes the counters.
///
/// Must be called once per process; the returned handle renders the
/// `/admin/metrics` page.
///
/// # Errors
///
/// Returns an error if a recorder is already installed.
pub fn install_metrics_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install metrics recorder")?;

    metrics::describe_counter!("links_created_total", "Short links created");
    metrics::describe_counter!("links_deleted_total", "Short links deleted");
    metrics::describe_counter!("link_redirects_total", "Aliases resolved to a destination");
    metrics::describe_counter!(
        "link_delete_denied_total",
        "Delete requests rejected for a wrong admin password"
    );

    Ok(handle)
}

/// Opens the store selected by the configuration.
///
/// # Errors
///
/// Returns an error if Redis cannot be reached.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.store_backend {
        StoreBackend::Redis => Arc::new(
            RedisStore::connect(&config.redis_url)
                .await
                .context("Failed to connect to Redis")?,
        ),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; links are lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(store)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Store connection
/// - Listen address from `conf:addr` (written on first run)
/// - Axum HTTP server, stopped by Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - The store is unreachable
/// - The listen address cannot be read or persisted
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config, metrics: PrometheusHandle) -> Result<()> {
    let store = connect_store(&config).await?;

    let addr = resolve_listen_addr(store.as_ref(), &config.default_listen_addr).await?;

    let state = AppState::new(store, metrics);
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
