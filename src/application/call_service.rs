//! Outbound call use cases

use crate::domain::call::{
    CallPage, CallStatusQuery, ListCallsRequest, OutboundCallRequest, RetellApi,
    CREATE_PHONE_CALL_PATH, LIST_CALLS_PATH,
};
use crate::domain::shared::Result;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Places and inspects calls through the Retell API.
pub struct CallService {
    api: Arc<dyn RetellApi>,
    from_number: String,
}

impl CallService {
    /// `from_number` is the Retell-managed number every call is placed from.
    pub fn new(api: Arc<dyn RetellApi>, from_number: impl Into<String>) -> Self {
        Self {
            api,
            from_number: from_number.into(),
        }
    }

    pub fn from_number(&self) -> &str {
        &self.from_number
    }

    /// Create an outbound phone call, returning Retell's call object.
    pub async fn create_call(&self, request: &OutboundCallRequest) -> Result<Value> {
        info!("Creating outbound call to {}", request.to_number());

        let body = request.upstream_body(&self.from_number);
        let call = self
            .api
            .post(CREATE_PHONE_CALL_PATH, body)
            .await
            .map_err(|e| {
                error!("Error creating Retell call: {}", e);
                e
            })?;

        debug!("Retell create-phone-call response: {}", call);
        Ok(call)
    }

    /// Fetch a call's current state (status, transcript, ...).
    pub async fn get_call(&self, query: &CallStatusQuery) -> Result<Value> {
        info!("Fetching call {}", query.call_id());

        let call = self.api.get(&query.upstream_path()).await.map_err(|e| {
            error!("Error fetching call {}: {}", query.call_id(), e);
            e
        })?;

        Ok(call)
    }

    /// List one page of calls handled by an agent.
    pub async fn list_calls(&self, request: &ListCallsRequest) -> Result<CallPage> {
        info!(
            "Listing calls for agent {} (limit {})",
            request.agent_id(),
            request.limit()
        );

        let response = self
            .api
            .post(LIST_CALLS_PATH, request.upstream_body())
            .await
            .map_err(|e| {
                error!("Error listing Retell calls: {}", e);
                e
            })?;

        let page = CallPage::from_upstream(response);
        debug!("Retell returned {} calls", page.calls.len());
        Ok(page)
    }
}
