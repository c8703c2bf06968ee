//! Domain layer - Core business rules
//!
//! This layer contains:
//! - Validated call requests and the Retell API port
//! - Shared-secret authentication rules
//! - Shared error types

pub mod api_auth;
pub mod call;
pub mod shared;

// Re-export commonly used types
pub use shared::{DomainError, Result, UpstreamError};
