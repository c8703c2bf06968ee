//! Outbound call API handlers

use super::dto::{
    CallCreatedResponse, CallListResponse, CallStatusResponse, CreateCallBody, ListCallsBody,
};
use super::error::ApiError;
use super::extract::Payload;
use super::router::AppState;
use crate::domain::call::{CallStatusQuery, ListCallsRequest, OutboundCallRequest};
use axum::{
    extract::{
        path::ErrorKind,
        rejection::PathRejection,
        Path, State,
    },
    Json,
};
use tracing::info;

const CREATE_CALL_FALLBACK: &str = "Unknown Retell call creation error";
const CALL_STATUS_FALLBACK: &str = "Unknown error fetching call data";
const LIST_CALLS_FALLBACK: &str = "Unknown Retell list-calls error";

/// Create a new outbound call via Retell
pub async fn create_outbound_call(
    State(state): State<AppState>,
    Payload(body): Payload<CreateCallBody>,
) -> Result<Json<CallCreatedResponse>, ApiError> {
    info!("API: Creating outbound call");

    let request = OutboundCallRequest::try_from(body)
        .map_err(|e| ApiError::from_domain(e, CREATE_CALL_FALLBACK))?;

    let call = state
        .calls
        .create_call(&request)
        .await
        .map_err(|e| ApiError::from_domain(e, CREATE_CALL_FALLBACK))?;

    Ok(Json(CallCreatedResponse::new(call)))
}

/// Get call info (status, transcript, ...) by Retell call ID
///
/// Also mounted on `/call-status/` so an empty ID gets a 400 instead of a 404.
pub async fn get_call_status(
    State(state): State<AppState>,
    call_id: Result<Path<String>, PathRejection>,
) -> Result<Json<CallStatusResponse>, ApiError> {
    let query = CallStatusQuery::new(call_id_segment(call_id)?)
        .map_err(|e| ApiError::from_domain(e, CALL_STATUS_FALLBACK))?;

    info!("API: Getting call status for {}", query.call_id());

    let call = state
        .calls
        .get_call(&query)
        .await
        .map_err(|e| ApiError::from_domain(e, CALL_STATUS_FALLBACK))?;

    Ok(Json(CallStatusResponse::new(call)))
}

/// `None` when the route has no id segment, an error when it cannot be decoded.
fn call_id_segment(
    call_id: Result<Path<String>, PathRejection>,
) -> Result<Option<String>, ApiError> {
    match call_id {
        Ok(Path(id)) => Ok(Some(id)),
        Err(PathRejection::FailedToDeserializePathParams(e))
            if matches!(e.kind(), ErrorKind::InvalidUtf8InPathParam { .. }) =>
        {
            Err(ApiError::BadRequest(
                "Invalid 'callId' in URL: not valid UTF-8".to_string(),
            ))
        }
        Err(_) => Ok(None),
    }
}

/// List calls handled by one agent, one page at a time
pub async fn list_calls_by_agent(
    State(state): State<AppState>,
    Payload(body): Payload<ListCallsBody>,
) -> Result<Json<CallListResponse>, ApiError> {
    info!("API: Listing calls by agent");

    let request = ListCallsRequest::try_from(body)
        .map_err(|e| ApiError::from_domain(e, LIST_CALLS_FALLBACK))?;

    let page = state
        .calls
        .list_calls(&request)
        .await
        .map_err(|e| ApiError::from_domain(e, LIST_CALLS_FALLBACK))?;

    Ok(Json(page.into()))
}
