//! Request body extractor accepting JSON or HTML form encoding.

use axum::{
    Form, Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::AppError;

/// Body decoded from `application/json` or `application/x-www-form-urlencoded`.
///
/// A request without a body yields `T::default()`, so a missing field is
/// reported by the registry rather than as a decoding failure. Requests
/// without a content type are decoded as JSON.
#[derive(Debug)]
pub struct LinkBody<T>(pub T);

impl<T, S> FromRequest<S> for LinkBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| invalid_body(e.body_text()))?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| invalid_body(e.body_text()))?;

        if bytes.is_empty() {
            return Ok(Self(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes).map_err(|e| invalid_body(e.body_text()))?;
        Ok(Self(value))
    }
}

fn invalid_body(reason: String) -> AppError {
    AppError::bad_request("Invalid request body", json!({ "reason": reason }))
}
