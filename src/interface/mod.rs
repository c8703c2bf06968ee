//! Interface layer - External interfaces
//!
//! This layer handles:
//! - REST API endpoints
//! - Authentication of inbound requests
//! - Request/response formatting

pub mod api;
