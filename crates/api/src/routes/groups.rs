//! Route definitions for the `/groups` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::group;
use crate::state::AppState;

/// Routes mounted at `/groups`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> replace
/// PATCH  /{id}      -> patch
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(group::list).post(group::create))
        .route(
            "/{id}",
            get(group::get_by_id)
                .put(group::replace)
                .patch(group::patch)
                .delete(group::delete),
        )
}
