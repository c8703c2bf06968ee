//! Authentication middleware

use super::error::ApiError;
use super::router::AppState;
use crate::domain::api_auth::API_KEY_HEADER;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

/// Reject requests without the shared secret before they reach a handler.
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    let decision = state.auth.authorize(req.uri().path(), presented);

    match decision {
        Ok(_) => Ok(next.run(req).await),
        Err(e) => {
            warn!("API: Rejected {} {}: {}", req.method(), req.uri().path(), e);
            Err(ApiError::Unauthorized)
        }
    }
}
