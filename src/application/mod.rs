//! Application layer - Use cases and application services
//!
//! This layer orchestrates domain objects to fulfill use cases: it validates
//! nothing itself, but turns already-validated requests into exactly one
//! Retell API call and shapes what comes back.

pub mod call_service;

pub use call_service::CallService;
