//! Retell Outbound - an authenticated HTTP front for Retell phone calls
//!
//! Clients create outbound calls, check call status and list calls by agent
//! through a small REST API. Requests are validated, forwarded to the Retell
//! API with server-side credentials, and the responses are reshaped into a
//! uniform `{success, ...}` envelope.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::error::DomainError;
pub use domain::shared::result::Result;
