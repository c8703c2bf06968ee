//! Request body extraction
//!
//! Bodies may arrive as JSON, as `application/x-www-form-urlencoded` or as
//! `text/plain`. A missing, empty or `null` body counts as "no fields", so
//! handlers report the specific missing field instead of a generic parse
//! failure.

use super::error::ApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Read the request body as a JSON value.
///
/// Form bodies become an object of string fields and plain text becomes a
/// string; an empty body is `Null`.
pub async fn body_value<S>(req: Request, state: &S) -> Result<Value, ApiError>
where
    S: Send + Sync,
{
    if has_content_type(req.headers(), "application/x-www-form-urlencoded") {
        let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        let object: Map<String, Value> = fields
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        return Ok(Value::Object(object));
    }

    let plain_text = has_content_type(req.headers(), "text/plain");
    let bytes = Bytes::from_request(req, state)
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    if plain_text {
        return String::from_utf8(bytes.to_vec())
            .map(Value::String)
            .map_err(|_| ApiError::BadRequest("Invalid text body: not valid UTF-8".to_string()));
    }

    serde_json::from_slice(&bytes).map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))
}

fn has_content_type(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with(expected))
        .unwrap_or(false)
}

/// Typed request body; a missing body deserializes as `T::default()`.
#[derive(Debug)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_value(req, state).await? {
            Value::Null => Ok(Payload(T::default())),
            value => serde_json::from_value(value)
                .map(Payload)
                .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}"))),
        }
    }
}
