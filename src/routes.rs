//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /{key}`        - Redirect to destination (public)
//! - `POST   /{key}`        - Create alias (public)
//! - `DELETE /{key}`        - Delete alias (admin password in body)
//! - `GET    /admin/health` - Store health check
//! - `GET    /admin/metrics` - Prometheus counters
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(api::routes::link_routes())
        .nest("/admin", api::routes::admin_routes())
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
