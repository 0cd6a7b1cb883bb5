//! Request body extraction
//!
//! Bodies are parsed as JSON whatever the Content-Type says, and an empty
//! body counts as `{}`. Parse failures become 400s with a JSON `detail`.

use axum::extract::{FromRequest, Request};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::handlers::ApiError;

/// Lenient JSON body
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read body: {}", e)))?;

        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(JsonBody(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))
    }
}

/// Body accepted by every operation
#[derive(Debug, Default, Deserialize)]
pub struct CaptionRequest {
    pub url: Option<String>,
    pub language_code: Option<String>,
    pub format: Option<String>,
}

impl CaptionRequest {
    pub fn url(&self) -> Result<&str, ApiError> {
        required(&self.url, "URL is required")
    }

    pub fn language_code(&self) -> Result<&str, ApiError> {
        required(&self.language_code, "language_code is required")
    }
}

fn required<'a>(field: &'a Option<String>, message: &str) -> Result<&'a str, ApiError> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(message.to_string()))
}
