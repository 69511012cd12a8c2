//! Handlers for the `/groups` resource.
//!
//! Replace and patch share one path: fetch the current row, merge the input
//! onto it, validate the merged group, then write it back gated on version.
//! A stale version surfaces as 404 like a missing row.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fairshare_db::models::group::{CreateGroup, Group, PatchGroup, ReplaceGroup};

use crate::error::AppResult;
use crate::extract::{PathId, ValidJson};
use crate::query::GroupListParams;
use crate::response::{DataResponse, MessageResponse, PaginatedResponse};
use crate::state::AppState;

/// POST /api/v1/groups
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateGroup>,
) -> AppResult<(StatusCode, Json<DataResponse<Group>>)> {
    input.validate()?;
    let group = state.groups.insert(&input).await?;
    tracing::info!(group_id = group.id, created_by = group.created_by, "Group created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: group })))
}

/// GET /api/v1/groups
pub async fn list(
    State(state): State<AppState>,
    params: GroupListParams,
) -> AppResult<Json<PaginatedResponse<Group>>> {
    let filter = params.into_filter()?;
    let (groups, metadata) = state.groups.list(&filter).await?;
    Ok(Json(PaginatedResponse {
        data: groups,
        metadata,
    }))
}

/// GET /api/v1/groups/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<DataResponse<Group>>> {
    let group = state.groups.get(id).await?;
    Ok(Json(DataResponse { data: group }))
}

/// PUT /api/v1/groups/{id}
pub async fn replace(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidJson(input): ValidJson<ReplaceGroup>,
) -> AppResult<Json<DataResponse<Group>>> {
    let current = state.groups.get(id).await?;
    let candidate = input.apply_to(current);
    save(&state, candidate).await
}

/// PATCH /api/v1/groups/{id}
pub async fn patch(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidJson(input): ValidJson<PatchGroup>,
) -> AppResult<Json<DataResponse<Group>>> {
    let current = state.groups.get(id).await?;
    let candidate = input.apply_to(current);
    save(&state, candidate).await
}

/// DELETE /api/v1/groups/{id}
pub async fn delete(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<MessageResponse>> {
    state.groups.delete(id).await?;
    tracing::info!(group_id = id, "Group deleted");
    Ok(Json(MessageResponse {
        message: "The item was deleted successfully",
    }))
}

async fn save(state: &AppState, candidate: Group) -> AppResult<Json<DataResponse<Group>>> {
    candidate.validate()?;
    let group = state.groups.update(&candidate).await?;
    tracing::info!(group_id = group.id, version = group.version, "Group updated");
    Ok(Json(DataResponse { data: group }))
}
