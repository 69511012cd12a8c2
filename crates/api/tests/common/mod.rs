#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use fairshare_db::{DbConfig, GroupStore, MemoryGroupStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

use fairshare_api::config::{Environment, LogFormat, ServerConfig};
use fairshare_api::router::build_app_router;
use fairshare_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout. The database settings are never used
/// because tests run against the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: Environment::Development,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        log_format: LogFormat::Text,
        db: DbConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            idle_timeout: Duration::from_secs(60),
            acquire_timeout: Duration::from_secs(1),
        },
        query_timeout: Duration::from_secs(10),
    }
}

/// Build the full application router over `store`.
pub fn build_app_with_store(store: Arc<dyn GroupStore>) -> Router {
    let config = test_config();
    let state = AppState {
        groups: store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Build the full application router over a fresh in-memory store.
///
/// The router is cheap to clone and every clone shares the same store, so a
/// test can send several requests with `app.clone()`.
pub fn build_test_app() -> Router {
    build_app_with_store(Arc::new(MemoryGroupStore::new()))
}

pub async fn send(app: Router, method: Method, uri: &str, body: Body) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Body::from(json.to_string())).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Body::from(json.to_string())).await
}

pub async fn patch_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Body::from(json.to_string())).await
}

/// Send a raw, possibly invalid, body.
pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> Response<Body> {
    send(app, Method::POST, uri, body.into()).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a group through the API and return its `data` object.
pub async fn create_group(app: &Router, name: &str, currency: &str) -> serde_json::Value {
    let response = post_json(
        app.clone(),
        "/api/v1/groups",
        serde_json::json!({"name": name, "currency": currency, "created_by": 1}),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"].clone()
}
