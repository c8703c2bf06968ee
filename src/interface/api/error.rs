//! HTTP error mapping
//!
//! Every failure leaves the server as JSON: client-side problems as
//! `{error}` and upstream failures as `{success: false, error}`.

use super::dto::{ErrorBody, FailureBody};
use crate::domain::shared::DomainError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 400, message returned verbatim
    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not Found")]
    NotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// 500 for anything that went wrong after validation
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    /// Map a domain error, using `fallback` when Retell gave no detail
    /// (e.g. an error status with an empty body).
    pub fn from_domain(err: DomainError, fallback: &str) -> Self {
        match err {
            DomainError::Validation(message) => ApiError::BadRequest(message),
            DomainError::Upstream(upstream) if upstream.detail().trim().is_empty() => {
                ApiError::Upstream(fallback.to_string())
            }
            DomainError::Upstream(upstream) => ApiError::Upstream(upstream.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Upstream(error) => (status, Json(FailureBody::new(error))).into_response(),
            other => (status, Json(ErrorBody::new(other.to_string()))).into_response(),
        }
    }
}
