//! API request bodies and response envelopes

use crate::domain::call::{CallPage, ListCallsRequest, OutboundCallRequest};
use crate::domain::shared::DomainError;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const CALL_INITIATED_MESSAGE: &str = "Retell call initiated successfully";

/// Body of `POST /outbound-call`
#[derive(Debug, Default, Deserialize)]
pub struct CreateCallBody {
    pub to_number: Option<String>,
    pub metadata: Option<Map<String, Value>>,
    pub override_agent_id: Option<String>,
    #[serde(alias = "dynamic_variables")]
    pub retell_llm_dynamic_variables: Option<Map<String, Value>>,
}

impl TryFrom<CreateCallBody> for OutboundCallRequest {
    type Error = DomainError;

    fn try_from(body: CreateCallBody) -> Result<Self, Self::Error> {
        Ok(OutboundCallRequest::new(body.to_number)?
            .with_metadata(body.metadata)
            .with_override_agent_id(body.override_agent_id)
            .with_dynamic_variables(body.retell_llm_dynamic_variables))
    }
}

/// Body of `POST /list-calls-by-agent`
#[derive(Debug, Default, Deserialize)]
pub struct ListCallsBody {
    pub agent_id: Option<String>,
    #[serde(default, deserialize_with = "limit_from_number_or_text")]
    pub limit: Option<u32>,
    pub pagination_key: Option<String>,
}

/// Form bodies carry every field as text, so `limit` may arrive as `"10"`.
/// An empty string counts as absent.
fn limit_from_number_or_text<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Limit {
        Number(u32),
        Text(String),
    }

    match Option::<Limit>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Limit::Number(limit)) => Ok(Some(limit)),
        Some(Limit::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Limit::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid limit '{text}'"))),
    }
}

impl TryFrom<ListCallsBody> for ListCallsRequest {
    type Error = DomainError;

    fn try_from(body: ListCallsBody) -> Result<Self, Self::Error> {
        Ok(ListCallsRequest::new(body.agent_id)?
            .with_limit(body.limit)
            .with_pagination_key(body.pagination_key))
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallCreatedResponse {
    pub success: bool,
    pub message: String,
    pub call_details: Value,
}

impl CallCreatedResponse {
    pub fn new(call_details: Value) -> Self {
        Self {
            success: true,
            message: CALL_INITIATED_MESSAGE.to_string(),
            call_details,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallStatusResponse {
    pub success: bool,
    pub call_info: Value,
}

impl CallStatusResponse {
    pub fn new(call_info: Value) -> Self {
        Self {
            success: true,
            call_info,
        }
    }
}

/// `pagination_key` is always present, `null` on the last page.
#[derive(Debug, Serialize, Deserialize)]
pub struct CallListResponse {
    pub success: bool,
    pub calls: Vec<Value>,
    pub pagination_key: Option<Value>,
}

impl From<CallPage> for CallListResponse {
    fn from(page: CallPage) -> Self {
        Self {
            success: true,
            calls: page.calls,
            pagination_key: page.pagination_key,
        }
    }
}

/// Echo returned by the diagnostic form endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct FormEcho {
    pub received: Value,
}

/// `{error}` for rejected requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// `{success: false, error}` for failures past validation
#[derive(Debug, Serialize, Deserialize)]
pub struct FailureBody {
    pub success: bool,
    pub error: String,
}

impl FailureBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
