//! Route configuration for the alias API.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, health_handler, metrics_handler, redirect_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Alias routes.
///
/// # Endpoints
///
/// - `GET    /{key}` - Redirect to the stored destination
/// - `POST   /{key}` - Register a new alias
/// - `DELETE /{key}` - Delete an alias (admin password required)
pub fn link_routes() -> Router<AppState> {
    Router::new().route(
        "/{key}",
        get(redirect_handler)
            .post(create_link_handler)
            .delete(delete_link_handler),
    )
}

/// Operational routes, nested under `/admin`.
///
/// Aliases are single path segments, so nothing here can collide with one.
///
/// # Endpoints
///
/// - `GET /health` - Store connectivity check
/// - `GET /metrics` - Prometheus text exposition of the service counters
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
}
