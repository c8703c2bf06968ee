//! Validated call requests and list results

use crate::domain::shared::{DomainError, Result};
use serde_json::{json, Map, Value};

use super::gateway::GET_CALL_PATH;

pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Request to place an outbound call.
///
/// The caller never chooses `from_number`; it is filled in from server
/// configuration when the upstream body is built.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundCallRequest {
    to_number: String,
    metadata: Map<String, Value>,
    override_agent_id: Option<String>,
    dynamic_variables: Option<Map<String, Value>>,
}

impl OutboundCallRequest {
    pub fn new(to_number: Option<String>) -> Result<Self> {
        let to_number = required(to_number, "Missing 'to_number' in request body")?;
        Ok(Self {
            to_number,
            metadata: Map::new(),
            override_agent_id: None,
            dynamic_variables: None,
        })
    }

    pub fn with_metadata(mut self, metadata: Option<Map<String, Value>>) -> Self {
        self.metadata = metadata.unwrap_or_default();
        self
    }

    pub fn with_override_agent_id(mut self, agent_id: Option<String>) -> Self {
        self.override_agent_id = agent_id;
        self
    }

    pub fn with_dynamic_variables(mut self, variables: Option<Map<String, Value>>) -> Self {
        self.dynamic_variables = variables;
        self
    }

    pub fn to_number(&self) -> &str {
        &self.to_number
    }

    /// Build the upstream body, placing the call from `from_number`.
    ///
    /// Optional fields the client left out are omitted rather than sent as null.
    pub fn upstream_body(&self, from_number: &str) -> Value {
        let mut body = json!({
            "from_number": from_number,
            "to_number": self.to_number,
            "metadata": self.metadata,
        });
        if let Some(agent_id) = &self.override_agent_id {
            body["override_agent_id"] = json!(agent_id);
        }
        if let Some(variables) = &self.dynamic_variables {
            body["retell_llm_dynamic_variables"] = json!(variables);
        }
        body
    }
}

/// Lookup of a single call by its Retell id
#[derive(Debug, Clone, PartialEq)]
pub struct CallStatusQuery {
    call_id: String,
}

impl CallStatusQuery {
    pub fn new(call_id: Option<String>) -> Result<Self> {
        let call_id = required(call_id, "Missing 'callId' in URL")?;
        Ok(Self { call_id })
    }

    pub fn call_id(&self) -> &str {
        &self.call_id
    }

    pub fn upstream_path(&self) -> String {
        format!("{}/{}", GET_CALL_PATH, self.call_id)
    }
}

/// Page of calls placed by one agent
#[derive(Debug, Clone, PartialEq)]
pub struct ListCallsRequest {
    agent_id: String,
    limit: u32,
    pagination_key: Option<String>,
}

impl ListCallsRequest {
    pub fn new(agent_id: Option<String>) -> Result<Self> {
        let agent_id = required(agent_id, "Missing 'agent_id' in request body")?;
        Ok(Self {
            agent_id,
            limit: DEFAULT_LIST_LIMIT,
            pagination_key: None,
        })
    }

    pub fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
        self
    }

    pub fn with_pagination_key(mut self, key: Option<String>) -> Self {
        self.pagination_key = key;
        self
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Retell expects `filter_criteria.agent_id` as a list, even for one agent.
    pub fn upstream_body(&self) -> Value {
        json!({
            "filter_criteria": { "agent_id": [self.agent_id] },
            "limit": self.limit,
            "pagination_key": self.pagination_key,
        })
    }
}

/// One page of calls as returned to clients
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallPage {
    pub calls: Vec<Value>,
    /// Token for the next page, `None` on the last one
    pub pagination_key: Option<Value>,
}

impl CallPage {
    /// Pick the documented fields out of a list-calls response.
    ///
    /// Missing or null fields are defaulted rather than treated as errors. A
    /// bare array response is taken as the call list itself.
    pub fn from_upstream(response: Value) -> Self {
        match response {
            Value::Array(calls) => Self {
                calls,
                pagination_key: None,
            },
            Value::Object(mut fields) => {
                let calls = match fields.remove("calls") {
                    Some(Value::Array(calls)) => calls,
                    _ => Vec::new(),
                };
                let pagination_key = fields.remove("pagination_key").filter(is_present);
                Self {
                    calls,
                    pagination_key,
                }
            }
            _ => Self::default(),
        }
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn required(value: Option<String>, message: &str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DomainError::Validation(message.to_string()))
}
