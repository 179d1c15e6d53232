//! Tests for scribe-llm: wire types, error mapping, and the Moonshot provider
//! against a local stand-in endpoint

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use reqwest::StatusCode as ReqwestStatus;
use scribe_llm::moonshot::error_from_status;
use scribe_llm::*;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

// ===========================================================================
// ChatRequest
// ===========================================================================

#[test]
fn single_user_request_shape() {
    let req = ChatRequest::single_user("moonshot-v1-8k", "写一首诗", 0.7, 8192);
    assert_eq!(req.messages.len(), 1);
    assert_eq!(req.messages[0].role, Role::User);
    assert!(!req.stream);

    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(
        json,
        json!({
            "model": "moonshot-v1-8k",
            "messages": [{"role": "user", "content": "写一首诗"}],
            "temperature": 0.7,
            "max_tokens": 8192,
            "stream": false
        })
    );
}

#[test]
fn chat_message_constructors() {
    assert_eq!(ChatMessage::user("a").role, Role::User);
}

// ===========================================================================
// ChatResponse
// ===========================================================================

#[test]
fn response_first_text() {
    let resp: ChatResponse = serde_json::from_value(json!({
        "id": "cmpl-1",
        "model": "moonshot-v1-8k",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": "Once..."}, "finish_reason": "stop"},
            {"index": 1, "message": {"role": "assistant", "content": "Other"}, "finish_reason": "stop"}
        ],
        "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
    }))
    .unwrap();
    assert_eq!(resp.first_text(), Some("Once..."));
    assert_eq!(resp.usage.unwrap().total_tokens, 12);
}

#[test]
fn response_without_choices_has_no_text() {
    let resp: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
    assert!(resp.first_text().is_none());
}

#[test]
fn response_with_null_content_has_no_text() {
    let resp: ChatResponse = serde_json::from_value(json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]
    }))
    .unwrap();
    assert!(resp.first_text().is_none());
}

#[test]
fn response_from_text() {
    assert_eq!(ChatResponse::from_text("hi").first_text(), Some("hi"));
}

// ===========================================================================
// Error mapping
// ===========================================================================

fn error_body(message: &str, error_type: &str) -> String {
    json!({"error": {"message": message, "type": error_type}}).to_string()
}

#[test]
fn error_type_takes_precedence_over_status() {
    let err = error_from_status(
        ReqwestStatus::TOO_MANY_REQUESTS,
        &error_body("Your account is suspended", "exceeded_current_quota_error"),
    );
    assert!(matches!(err, LlmError::QuotaExceeded(ref m) if m == "Your account is suspended"));

    let err = error_from_status(
        ReqwestStatus::BAD_REQUEST,
        &error_body("Invalid Authentication", "invalid_authentication_error"),
    );
    assert!(matches!(err, LlmError::AuthFailed(_)));

    let err = error_from_status(
        ReqwestStatus::TOO_MANY_REQUESTS,
        &error_body("slow down", "rate_limit_reached_error"),
    );
    assert!(matches!(err, LlmError::RateLimited(_)));
}

#[test]
fn status_fallbacks() {
    assert!(matches!(
        error_from_status(ReqwestStatus::UNAUTHORIZED, "nope"),
        LlmError::AuthFailed(ref m) if m == "nope"
    ));
    assert!(matches!(
        error_from_status(ReqwestStatus::TOO_MANY_REQUESTS, "too many"),
        LlmError::RateLimited(_)
    ));
    assert!(matches!(
        error_from_status(ReqwestStatus::TOO_MANY_REQUESTS, "insufficient balance"),
        LlmError::QuotaExceeded(_)
    ));
    assert!(matches!(
        error_from_status(ReqwestStatus::PAYMENT_REQUIRED, ""),
        LlmError::QuotaExceeded(_)
    ));
}

#[test]
fn unknown_errors_keep_status_and_message() {
    let err = error_from_status(
        ReqwestStatus::INTERNAL_SERVER_ERROR,
        &error_body("engine overloaded", "engine_overloaded_error"),
    );
    match err {
        LlmError::Api { status, error_type, message } => {
            assert_eq!(status, 500);
            assert_eq!(error_type.as_deref(), Some("engine_overloaded_error"));
            assert_eq!(message, "engine overloaded");
        }
        other => panic!("Expected Api, got {:?}", other),
    }
}

#[test]
fn empty_error_body_uses_reason_phrase() {
    let err = error_from_status(ReqwestStatus::BAD_GATEWAY, "");
    assert_eq!(err.to_string(), "api error 502: Bad Gateway");
}

#[test]
fn llm_error_display() {
    assert_eq!(LlmError::InvalidResponse("boom".into()).to_string(), "invalid response: boom");
    assert_eq!(LlmError::ClientInit("x".into()).to_string(), "client init failed: x");
}

// ===========================================================================
// MoonshotProvider against a local endpoint
// ===========================================================================

#[derive(Clone, Default)]
struct Captured {
    bodies: Arc<Mutex<Vec<Value>>>,
    auth: Arc<Mutex<Vec<String>>>,
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

async fn ok_handler(
    State(captured): State<Captured>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    captured.auth.lock().unwrap().push(auth);
    captured.bodies.lock().unwrap().push(body);
    Json(json!({
        "id": "cmpl-test",
        "model": "moonshot-v1-8k",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": "Once..."}, "finish_reason": "stop"}]
    }))
}

#[tokio::test]
async fn provider_sends_exact_request_and_returns_text() {
    let captured = Captured::default();
    let app = Router::new()
        .route("/v1/chat/completions", post(ok_handler))
        .with_state(captured.clone());
    let base_url = serve(app).await;

    let connector = MoonshotConnector::new(base_url);
    let provider = connector.connect("sk-test").unwrap();
    assert_eq!(provider.name(), "moonshot");

    let resp = provider
        .complete(ChatRequest::single_user("moonshot-v1-8k", "请以友情为核心", 0.7, 8192))
        .await
        .unwrap();
    assert_eq!(resp.first_text(), Some("Once..."));

    let bodies = captured.bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["model"], "moonshot-v1-8k");
    assert_eq!(bodies[0]["temperature"], 0.7);
    assert_eq!(bodies[0]["max_tokens"], 8192);
    assert_eq!(bodies[0]["stream"], false);
    assert_eq!(bodies[0]["messages"], json!([{"role": "user", "content": "请以友情为核心"}]));
    assert_eq!(captured.auth.lock().unwrap()[0], "Bearer sk-test");
}

async fn unauthorized_handler() -> impl IntoResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": {"message": "Invalid Authentication", "type": "invalid_authentication_error"}})),
    )
}

#[tokio::test]
async fn provider_maps_401_to_auth_failed() {
    let app = Router::new().route("/v1/chat/completions", post(unauthorized_handler));
    let base_url = serve(app).await;
    let provider = MoonshotConnector::new(base_url).connect("sk-wrong").unwrap();
    let err = provider
        .complete(ChatRequest::single_user("m", "p", 0.7, 16))
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::AuthFailed(ref m) if m == "Invalid Authentication"));
}

async fn rate_limited_handler() -> impl IntoResponse {
    (StatusCode::TOO_MANY_REQUESTS, "Rate limit reached for requests")
}

#[tokio::test]
async fn provider_maps_plain_429_to_rate_limited() {
    let app = Router::new().route("/v1/chat/completions", post(rate_limited_handler));
    let base_url = serve(app).await;
    let provider = MoonshotConnector::new(base_url).connect("sk-x").unwrap();
    let err = provider
        .complete(ChatRequest::single_user("m", "p", 0.7, 16))
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::RateLimited(_)));
}

async fn garbage_handler() -> impl IntoResponse {
    (StatusCode::OK, "not json at all")
}

#[tokio::test]
async fn provider_rejects_malformed_success_body() {
    let app = Router::new().route("/v1/chat/completions", post(garbage_handler));
    let base_url = serve(app).await;
    let provider = MoonshotConnector::new(base_url).connect("sk-x").unwrap();
    let err = provider
        .complete(ChatRequest::single_user("m", "p", 0.7, 16))
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn provider_reports_unreachable_endpoint_as_network_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider = MoonshotConnector::new(format!("http://{}/v1", addr))
        .connect("sk-x")
        .unwrap();
    let err = provider
        .complete(ChatRequest::single_user("m", "p", 0.7, 16))
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::NetworkError(_)));
}

// ===========================================================================
// MoonshotConnector
// ===========================================================================

#[test]
fn connector_defaults_to_moonshot_base() {
    assert_eq!(MoonshotConnector::default().base_url(), "https://api.moonshot.cn/v1");
}

#[test]
fn connector_from_config() {
    let mut api = scribe_core::config::ApiConfig::default();
    api.base_url = "http://example.invalid/v1".into();
    let connector = MoonshotConnector::from_config(&api);
    assert_eq!(connector.base_url(), "http://example.invalid/v1");
}

#[test]
fn connector_rejects_unsendable_key() {
    let err = MoonshotConnector::default().connect("sk-\u{0}").err().unwrap();
    assert!(matches!(err, LlmError::ClientInit(_)));
}

#[test]
fn provider_endpoint_path() {
    let provider = MoonshotProvider::new("sk-x", "http://localhost:9/v1/", None).unwrap();
    assert_eq!(provider.endpoint(), "http://localhost:9/v1/chat/completions");
}
