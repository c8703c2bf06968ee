//! reqwest-based Retell API client

use crate::config::{RetellConfig, Secret};
use crate::domain::call::RetellApi;
use crate::domain::shared::UpstreamError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{Map, Value};
use tracing::debug;

const USER_AGENT: &str = concat!("retell-outbound/", env!("CARGO_PKG_VERSION"));

/// HTTP client bound to one Retell account.
///
/// Every request carries `Authorization: Bearer <api key>`. There are no
/// retries and no timeout beyond reqwest's defaults.
#[derive(Clone)]
pub struct RetellClient {
    client: Client,
    base_url: String,
    api_key: Secret,
}

impl RetellClient {
    pub fn new(config: &RetellConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| UpstreamError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, UpstreamError> {
        let response = request
            .bearer_auth(self.api_key.expose())
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        debug!("Retell responded {} ({} bytes)", status, body.len());
        parse_response(status, &body)
    }
}

#[async_trait]
impl RetellApi for RetellClient {
    async fn get(&self, path: &str) -> Result<Value, UpstreamError> {
        self.send(self.client.get(self.url(path))).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, UpstreamError> {
        self.send(self.client.post(self.url(path)).json(&body)).await
    }
}

/// Turn a raw Retell response into JSON or an [`UpstreamError`].
fn parse_response(status: StatusCode, body: &str) -> Result<Value, UpstreamError> {
    if !status.is_success() {
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    // 204s and empty 200s
    if body.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_str(body).map_err(|e| UpstreamError::Decode(e.to_string()))
}
