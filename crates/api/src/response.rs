//! Shared response envelope types for API handlers.
//!
//! Single resources use a `{ "data": ... }` envelope; listings add a
//! `metadata` block describing the page.

use fairshare_core::pagination::MetaData;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: group }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "message": "..." }` for operations with nothing to return.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `{ "data": [T], "metadata": {...} }` for paginated listings.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub metadata: MetaData,
}
