//! Retell API port

use crate::domain::shared::UpstreamError;
use async_trait::async_trait;
use serde_json::Value;

pub const CREATE_PHONE_CALL_PATH: &str = "/v2/create-phone-call";
pub const GET_CALL_PATH: &str = "/v2/get-call";
pub const LIST_CALLS_PATH: &str = "/v2/list-calls";

/// Access to the Retell API.
///
/// Defined here as a port and implemented by
/// [`RetellClient`](crate::infrastructure::retell::RetellClient). Responses
/// are kept as opaque JSON since the upstream schema is not ours.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RetellApi: Send + Sync {
    /// Authenticated GET of `path`, relative to the API base URL
    async fn get(&self, path: &str) -> Result<Value, UpstreamError>;

    /// Authenticated POST of a JSON `body` to `path`
    async fn post(&self, path: &str, body: Value) -> Result<Value, UpstreamError>;
}
