//! Handler for the metrics endpoint.

use axum::{extract::State, http::header, response::IntoResponse};

use crate::state::AppState;

/// Renders all recorded counters in the Prometheus text format.
///
/// # Endpoint
///
/// `GET /admin/metrics`
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
