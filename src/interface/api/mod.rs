//! REST API exposed to callers

pub mod auth;
pub mod calls_handler;
pub mod diagnostics;
pub mod dto;
pub mod error;
pub mod extract;
pub mod router;

pub use error::ApiError;
pub use router::{build_router, AppState};
