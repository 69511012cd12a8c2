//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use fairshare_core::pagination::MetaData;
use fairshare_core::types::DbId;
use fairshare_db::models::group::{CreateGroup, Group, GroupFilter};
use fairshare_db::{DbError, GroupStore};
use tower::ServiceExt;

/// A store whose every call times out.
struct UnreachableStore;

#[async_trait]
impl GroupStore for UnreachableStore {
    async fn insert(&self, _input: &CreateGroup) -> Result<Group, DbError> {
        Err(DbError::Timeout(Duration::from_millis(5)))
    }

    async fn get(&self, _id: DbId) -> Result<Group, DbError> {
        Err(DbError::Timeout(Duration::from_millis(5)))
    }

    async fn update(&self, _group: &Group) -> Result<Group, DbError> {
        Err(DbError::Timeout(Duration::from_millis(5)))
    }

    async fn delete(&self, _id: DbId) -> Result<(), DbError> {
        Err(DbError::Timeout(Duration::from_millis(5)))
    }

    async fn list(&self, _filter: &GroupFilter) -> Result<(Vec<Group>, MetaData), DbError> {
        Err(DbError::Timeout(Duration::from_millis(5)))
    }

    async fn ping(&self) -> Result<(), DbError> {
        Err(DbError::Timeout(Duration::from_millis(5)))
    }
}

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = common::build_test_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["environment"], "development");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[tokio::test]
async fn health_check_reports_degraded_store() {
    let app = common::build_app_with_store(Arc::new(UnreachableStore));
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

// ---------------------------------------------------------------------------
// Test: store timeouts surface as 503
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_timeout_returns_503() {
    let app = common::build_app_with_store(Arc::new(UnreachableStore));
    let response = get(app, "/api/v1/groups/1").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "SERVICE_UNAVAILABLE");
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns the JSON 404 envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app();
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn unsupported_method_returns_405() {
    let app = common::build_test_app();
    let response = common::send(app, Method::DELETE, "/health", Body::empty()).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );

    // The value should be a valid UUID (36 chars with hyphens).
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID string");
}

// ---------------------------------------------------------------------------
// Test: CORS preflight OPTIONS request returns correct headers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_returns_correct_headers() {
    let app = common::build_test_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/groups")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    let allow_origin = headers
        .get("access-control-allow-origin")
        .expect("Missing Access-Control-Allow-Origin header")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:5173");

    let allow_methods = headers
        .get("access-control-allow-methods")
        .expect("Missing Access-Control-Allow-Methods header")
        .to_str()
        .unwrap();
    assert!(
        allow_methods.contains("POST"),
        "Allow-Methods should contain POST, got: {allow_methods}"
    );
}
