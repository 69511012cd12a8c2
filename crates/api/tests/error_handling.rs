//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use std::collections::BTreeMap;
use std::time::Duration;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use fairshare_api::error::AppError;
use fairshare_core::error::CoreError;
use fairshare_db::DbError;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Group",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Group with id 42 not found");
}

// ---------------------------------------------------------------------------
// Test: InvalidFields maps to 400 and carries the field map
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_fields_returns_400_with_fields() {
    let mut fields = BTreeMap::new();
    fields.insert("name".to_string(), "must be more than 1 character".to_string());
    fields.insert("currency".to_string(), "not a supported currency".to_string());

    let (status, json) = error_to_response(AppError::Core(CoreError::InvalidFields(fields))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Validation failed");
    assert_eq!(json["fields"]["name"], "must be more than 1 character");
    assert_eq!(json["fields"]["currency"], "not a supported currency");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("body must not be empty".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "body must not be empty");
}

// ---------------------------------------------------------------------------
// Test: DbError conversions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn db_not_found_becomes_core_not_found() {
    let err = AppError::from(DbError::group_not_found(7));
    assert_matches!(
        err,
        AppError::Core(CoreError::NotFound { entity: "Group", id: 7 })
    );
}

#[tokio::test]
async fn db_timeout_returns_503() {
    let err = AppError::from(DbError::Timeout(Duration::from_secs(10)));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn pool_timeout_returns_503() {
    let err = AppError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "SERVICE_UNAVAILABLE");
}

// ---------------------------------------------------------------------------
// Test: other database errors map to 500 and sanitize the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn raw_row_not_found_is_an_internal_error() {
    // Missing groups surface as `DbError::NotFound`; a bare sqlx
    // `RowNotFound` only means a query expected a row it did not get.
    let err = AppError::from(DbError::Sqlx(sqlx::Error::RowNotFound));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn database_error_returns_500_and_sanitizes_message() {
    let err = AppError::Database(sqlx::Error::Protocol(
        "secret database credentials leaked".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");

    let body_text = json.to_string();
    assert!(
        !body_text.contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: routing errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn routing_errors_use_the_envelope() {
    let (status, json) = error_to_response(AppError::NotFound).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");

    let (status, json) = error_to_response(AppError::MethodNotAllowed).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["code"], "METHOD_NOT_ALLOWED");
}
