//! Retell client end-to-end tests
//!
//! A throwaway axum server on a random local port plays the Retell API, so
//! the real reqwest client, configuration and router are exercised together.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, Method, Request, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use retell_outbound::config::Config;
use retell_outbound::domain::call::RetellApi;
use retell_outbound::domain::shared::UpstreamError;
use retell_outbound::infrastructure::retell::RetellClient;
use retell_outbound::interface::api::{build_router, AppState};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower::ServiceExt; // For `oneshot`

const RETELL_KEY: &str = "key_live";
const SERVER_KEY: &str = "server-secret";
const FROM_NUMBER: &str = "+15550000000";

/// Requests seen by the fake Retell server: (path, body)
#[derive(Clone, Default)]
struct Seen(Arc<Mutex<Vec<(String, Value)>>>);

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {RETELL_KEY}"))
        .unwrap_or(false)
}

async fn fake_create_call(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "bad api key" })));
    }
    seen.0
        .lock()
        .unwrap()
        .push(("/v2/create-phone-call".to_string(), body.clone()));
    (
        StatusCode::CREATED,
        Json(json!({
            "call_id": "c_live",
            "from_number": body["from_number"],
            "to_number": body["to_number"],
            "call_status": "registered",
        })),
    )
}

async fn fake_get_call(headers: HeaderMap, Path(call_id): Path<String>) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "bad api key" })));
    }
    if call_id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Call not found" })));
    }
    (
        StatusCode::OK,
        Json(json!({ "call_id": call_id, "call_status": "ended" })),
    )
}

async fn fake_list_calls(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "bad api key" })));
    }
    seen.0
        .lock()
        .unwrap()
        .push(("/v2/list-calls".to_string(), body));
    (
        StatusCode::OK,
        Json(json!([{ "call_id": "c_1" }, { "call_id": "c_2" }])),
    )
}

async fn spawn_fake_retell() -> (SocketAddr, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/v2/create-phone-call", post(fake_create_call))
        .route("/v2/get-call/:call_id", get(fake_get_call))
        .route("/v2/list-calls", post(fake_list_calls))
        .with_state(seen.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, seen)
}

fn config_for(base_url: &str, retell_key: &str) -> Config {
    let vars: HashMap<String, String> = [
        ("RETELL_API_KEY", retell_key),
        ("RETELL_PHONE_NUMBER", FROM_NUMBER),
        ("RETELL_BASE_URL", base_url),
        ("API_KEY", SERVER_KEY),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    Config::from_env_map(vars).expect("valid test configuration")
}

fn app_for(config: &Config) -> Router {
    let client = RetellClient::new(&config.retell).unwrap();
    build_router(AppState::from_config(config, Arc::new(client)))
}

async fn call(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-api-key", SERVER_KEY);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_client_get_and_post() {
    let (addr, seen) = spawn_fake_retell().await;
    let config = config_for(&format!("http://{addr}"), RETELL_KEY);
    let client = RetellClient::new(&config.retell).unwrap();

    let call = client.get("/v2/get-call/c_7").await.unwrap();
    assert_eq!(call, json!({ "call_id": "c_7", "call_status": "ended" }));

    let created = client
        .post(
            "/v2/create-phone-call",
            json!({ "from_number": FROM_NUMBER, "to_number": "+15551234567" }),
        )
        .await
        .unwrap();
    assert_eq!(created["call_id"], "c_live");
    assert_eq!(seen.0.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_client_reports_status_errors() {
    let (addr, _) = spawn_fake_retell().await;
    let config = config_for(&format!("http://{addr}"), RETELL_KEY);
    let client = RetellClient::new(&config.retell).unwrap();

    let err = client.get("/v2/get-call/missing").await.unwrap_err();
    match err {
        UpstreamError::Status { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("Call not found"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_client_sends_bearer_key() {
    let (addr, _) = spawn_fake_retell().await;
    let config = config_for(&format!("http://{addr}"), "key_wrong");
    let client = RetellClient::new(&config.retell).unwrap();

    let err = client.get("/v2/get-call/c_1").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_create_call_end_to_end() {
    let (addr, seen) = spawn_fake_retell().await;
    let config = config_for(&format!("http://{addr}/"), RETELL_KEY);

    let (status, json) = call(
        app_for(&config),
        Method::POST,
        "/outbound-call",
        Some(json!({ "to_number": "+15551234567", "from_number": "+19990000000" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Retell call initiated successfully");
    assert_eq!(json["callDetails"]["call_id"], "c_live");
    assert_eq!(json["callDetails"]["from_number"], FROM_NUMBER);

    let seen = seen.0.lock().unwrap();
    assert_eq!(seen[0].0, "/v2/create-phone-call");
    assert_eq!(
        seen[0].1,
        json!({
            "from_number": FROM_NUMBER,
            "to_number": "+15551234567",
            "metadata": {},
        })
    );
}

#[tokio::test]
async fn test_call_status_end_to_end() {
    let (addr, _) = spawn_fake_retell().await;
    let config = config_for(&format!("http://{addr}"), RETELL_KEY);

    let (status, json) = call(app_for(&config), Method::GET, "/call-status/c_42", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({ "success": true, "callInfo": { "call_id": "c_42", "call_status": "ended" } })
    );

    let (status, json) = call(app_for(&config), Method::GET, "/call-status/missing", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn test_list_calls_end_to_end() {
    let (addr, seen) = spawn_fake_retell().await;
    let config = config_for(&format!("http://{addr}"), RETELL_KEY);

    let (status, json) = call(
        app_for(&config),
        Method::POST,
        "/list-calls-by-agent",
        Some(json!({ "agent_id": "agent_1", "limit": 2 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "success": true,
            "calls": [{ "call_id": "c_1" }, { "call_id": "c_2" }],
            "pagination_key": null,
        })
    );

    let seen = seen.0.lock().unwrap();
    assert_eq!(
        seen[0].1,
        json!({
            "filter_criteria": { "agent_id": ["agent_1"] },
            "limit": 2,
            "pagination_key": null,
        })
    );
}

#[tokio::test]
async fn test_unreachable_retell_is_a_500() {
    // Grab a free port, then close it so nothing is listening there.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = config_for(&format!("http://{addr}"), RETELL_KEY);
    let (status, json) = call(
        app_for(&config),
        Method::POST,
        "/outbound-call",
        Some(json!({ "to_number": "+15551234567" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Retell request failed"));
}
