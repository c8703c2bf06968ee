//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Client input was missing or malformed. The message is returned verbatim.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Failure talking to the Retell API
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Retell API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Retell request failed: {0}")]
    Transport(String),

    #[error("Retell returned an invalid JSON body: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// HTTP status reported by Retell, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// What Retell or the transport reported, without the prefix
    pub fn detail(&self) -> &str {
        match self {
            UpstreamError::Status { body, .. } => body,
            UpstreamError::Transport(detail) | UpstreamError::Decode(detail) => detail,
        }
    }
}
