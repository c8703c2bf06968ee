//! Diagnostic endpoints

use super::dto::FormEcho;
use super::error::ApiError;
use super::extract::body_value;
use axum::{extract::Request, Json};
use tracing::info;

/// Echo back whatever body was submitted. Served without authentication.
pub async fn test_form(req: Request) -> Result<Json<FormEcho>, ApiError> {
    info!("API: Echoing test form");

    let received = body_value(req, &()).await?;
    Ok(Json(FormEcho { received }))
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Fallback for known routes hit with the wrong method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
