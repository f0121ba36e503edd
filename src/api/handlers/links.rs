//! Handlers for alias creation and deletion.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::link::{
    CreateLinkRequest, CreateLinkResponse, DeleteLinkRequest, DeleteLinkResponse,
};
use crate::api::extract::LinkBody;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new alias.
///
/// # Endpoint
///
/// `POST /{key}`
///
/// # Request Body
///
/// JSON or form-encoded:
///
/// ```json
/// { "url": "https://example.com/some/long/path", "admin_pw": "secret" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if a field is missing or invalid, or if the alias
/// is already taken (`code: "duplicate_key"`).
pub async fn create_link_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
    LinkBody(payload): LinkBody<CreateLinkRequest>,
) -> Result<Json<CreateLinkResponse>, AppError> {
    let link = state
        .registry
        .create(&key, &payload.url, &payload.admin_pw)
        .await?;

    Ok(Json(link.into()))
}

/// Deletes an alias, authorized by the admin password set at creation.
///
/// # Endpoint
///
/// `DELETE /{key}`
///
/// # Request Body
///
/// ```json
/// { "admin_pw": "secret" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the password is missing.
/// Returns 404 Not Found if the alias doesn't exist.
/// Returns 401 Unauthorized if the password doesn't match.
pub async fn delete_link_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
    LinkBody(payload): LinkBody<DeleteLinkRequest>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    state.registry.delete(&key, &payload.admin_pw).await?;

    Ok(Json(DeleteLinkResponse {
        alias: key,
        deleted: true,
    }))
}
