//! Handler for alias redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::error;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its stored destination.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// Responds with `302 Found` and the destination, byte for byte, in the
/// `Location` header.
///
/// # Errors
///
/// Returns 404 Not Found if the alias doesn't exist.
/// Returns 500 Internal Server Error if the store fails.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let destination = state.registry.resolve(&key).await?;

    let location = HeaderValue::from_bytes(destination.as_bytes()).map_err(|e| {
        error!(key, error = %e, "Stored destination is not a valid header value");
        AppError::internal("Invalid stored destination", json!({}))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
