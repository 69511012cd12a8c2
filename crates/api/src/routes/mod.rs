pub mod groups;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /groups    list, create, get, replace, patch, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/groups", groups::router())
}
