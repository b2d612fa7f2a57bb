//! Helpers for router tests against the in-memory store

use crate::config::AppConfig;
use crate::routes::create_router;
use crate::state::AppState;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

/// Router over fresh, empty in-memory repositories
pub fn memory_app() -> Router {
    create_router(AppState::in_memory(AppConfig::default()))
}

/// Send one request and return the status and raw body
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, String) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Send one request and parse the body as JSON
pub async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, body) = send(app, method, uri, body).await;
    let value = serde_json::from_str(&body)
        .unwrap_or_else(|e| panic!("{} {} returned non-JSON body {:?}: {}", method, uri, body, e));
    (status, value)
}
