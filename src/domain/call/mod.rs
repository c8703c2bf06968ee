//! Outbound call bounded context
//!
//! Calls themselves live in Retell; this module only holds the validated
//! inputs we send there, the shape of a list page, and the port through which
//! the Retell API is reached.

pub mod gateway;
pub mod request;

pub use gateway::{RetellApi, CREATE_PHONE_CALL_PATH, GET_CALL_PATH, LIST_CALLS_PATH};
pub use request::{CallPage, CallStatusQuery, ListCallsRequest, OutboundCallRequest};

#[cfg(test)]
pub use gateway::MockRetellApi;
