//! Shared-secret API authentication
//!
//! Every request must carry the configured secret in the `x-api-key` header,
//! except for a small allow-list of public paths.
//!
//! The comparison is a plain string equality, not a constant-time one, so
//! response timing may leak how much of a guessed key matched.

use crate::config::{AuthConfig, Secret};

/// Header clients put the shared secret in
pub const API_KEY_HEADER: &str = "x-api-key";

/// Paths served without authentication
pub const PUBLIC_PATHS: &[&str] = &["/test-form"];

/// Authentication error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingApiKey,
    InvalidApiKey,
    /// No secret configured, so nothing can match
    NotConfigured,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingApiKey => write!(f, "Missing API key"),
            AuthError::InvalidApiKey => write!(f, "Invalid API key"),
            AuthError::NotConfigured => write!(f, "Server API key not configured"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Outcome of checking a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Path is on the public allow-list
    Public,
    /// Correct key presented
    Authenticated,
}

/// Decides whether a request may reach a route handler.
#[derive(Debug, Clone)]
pub struct ApiKeyGate {
    api_key: Option<Secret>,
    public_paths: Vec<String>,
}

impl ApiKeyGate {
    pub fn new(api_key: Option<Secret>) -> Self {
        Self {
            api_key,
            public_paths: PUBLIC_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.api_key.clone())
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| p == path)
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Check `path` and the presented `x-api-key` value, if any.
    pub fn authorize(&self, path: &str, presented: Option<&str>) -> Result<Access, AuthError> {
        if self.is_public(path) {
            return Ok(Access::Public);
        }

        let presented = presented.ok_or(AuthError::MissingApiKey)?;
        let expected = self.api_key.as_ref().ok_or(AuthError::NotConfigured)?;

        if presented == expected.expose() {
            Ok(Access::Authenticated)
        } else {
            Err(AuthError::InvalidApiKey)
        }
    }
}
