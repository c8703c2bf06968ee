//! Infrastructure layer - Technical implementations
//!
//! This layer provides:
//! - The HTTP client for the Retell API (implements the domain `RetellApi` port)

pub mod retell;
