//! API Router configuration

use super::auth::require_api_key;
use super::calls_handler::{create_outbound_call, get_call_status, list_calls_by_agent};
use super::diagnostics::{method_not_allowed, not_found, test_form};
use crate::application::CallService;
use crate::config::Config;
use crate::domain::api_auth::ApiKeyGate;
use crate::domain::call::RetellApi;
use axum::{
    http::Method,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub calls: Arc<CallService>,
    pub auth: Arc<ApiKeyGate>,
}

impl AppState {
    pub fn new(calls: CallService, auth: ApiKeyGate) -> Self {
        Self {
            calls: Arc::new(calls),
            auth: Arc::new(auth),
        }
    }

    /// Wire the call service and auth gate from configuration.
    pub fn from_config(config: &Config, api: Arc<dyn RetellApi>) -> Self {
        Self::new(
            CallService::new(api, config.retell.phone_number.clone()),
            ApiKeyGate::from_config(&config.auth),
        )
    }
}

/// Build the API router
pub fn build_router(state: AppState) -> Router {
    // Outbound call routes
    let call_routes = Router::new()
        .route("/outbound-call", post(create_outbound_call))
        .route("/call-status/", get(get_call_status))
        .route("/call-status/:callId", get(get_call_status))
        .route("/list-calls-by-agent", post(list_calls_by_agent));

    // Diagnostic routes (public, see PUBLIC_PATHS)
    let diagnostic_routes = Router::new().route("/test-form", post(test_form));

    // Auth runs only for matched routes; CORS answers preflights before it.
    // A wrong method on a known path gets a JSON 405 without an auth check.
    Router::new()
        .merge(call_routes)
        .merge(diagnostic_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
