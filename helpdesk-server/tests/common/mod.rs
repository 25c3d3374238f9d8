//! Shared helpers for the HTTP integration tests

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::util::ServiceExt;

use helpdesk_server::api::build_app;
use helpdesk_server::auth::JwtConfig;
use helpdesk_server::core::{Config, ServerState};
use helpdesk_server::storage::Storage;

/// Build a fully wired application over an in-memory database
pub fn test_app() -> (Router, ServerState) {
    let mut config = Config::with_overrides("/tmp/helpdesk-test", 0);
    config.jwt = JwtConfig {
        secret: "integration-test-secret-0123456789abcdef".into(),
        expiration_minutes: 60,
        issuer: "helpdesk-server".into(),
        audience: "helpdesk-clients".into(),
    };

    let storage = Storage::open_in_memory().expect("in-memory storage");
    let state = ServerState::with_storage(&config, storage).expect("server state");
    (build_app(state.clone()), state)
}

/// Send one request through the router and return (status, parsed body)
pub async fn send(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Register a user and return a bearer token
pub async fn auth_token(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "operator",
            "email": "operator@example.com",
            "password": "correct-horse-battery",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {body}");
    body["data"]["access_token"]
        .as_str()
        .expect("access token")
        .to_string()
}
