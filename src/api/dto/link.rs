//! DTOs for alias creation and deletion.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// Request body for `POST /{key}`.
///
/// Missing fields deserialize as empty strings so the registry can report
/// which one is required.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateLinkRequest {
    pub url: String,
    pub admin_pw: String,
}

/// Request body for `DELETE /{key}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteLinkRequest {
    pub admin_pw: String,
}

/// Response for a created alias.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub alias: String,
    pub url: String,
    pub short_path: String,
}

impl From<Link> for CreateLinkResponse {
    fn from(link: Link) -> Self {
        Self {
            short_path: link.short_path(),
            alias: link.alias,
            url: link.destination,
        }
    }
}

/// Response for a deleted alias.
#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub alias: String,
    pub deleted: bool,
}
