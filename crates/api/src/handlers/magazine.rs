//! Handlers for the `/magazines` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use inkpress_core::error::CoreError;
use inkpress_core::types::DbId;
use inkpress_db::models::magazine::{CreateMagazine, Magazine, UpdateMagazineFields};
use inkpress_db::models::magazine_content::{AddMagazineContent, MagazineContent};
use inkpress_db::repositories::{MagazineContentRepo, MagazineRepo};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /magazines`.
#[derive(Debug, Deserialize)]
pub struct MagazineQuery {
    pub organization_id: DbId,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Maximum page size for magazine listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for magazine listing.
const DEFAULT_LIMIT: i64 = 50;

/// One issue together with its content placements in order.
#[derive(Debug, Serialize)]
pub struct MagazineDetail {
    pub magazine: Magazine,
    pub content: Vec<MagazineContent>,
}

/// POST /api/v1/magazines
///
/// Create a new magazine issue in `draft` status.
pub async fn create_magazine(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateMagazine>,
) -> AppResult<impl IntoResponse> {
    let created = state.assembler.create(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/magazines?organization_id={id}
///
/// List an organization's magazine issues, newest first.
pub async fn list_magazines(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MagazineQuery>,
) -> AppResult<Json<DataResponse<Vec<Magazine>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let items =
        MagazineRepo::list_by_organization(&state.pool, params.organization_id, limit, offset)
            .await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/magazines/{id}
///
/// Fetch one issue along with its content placements in order.
pub async fn get_magazine(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(magazine_id): Path<DbId>,
) -> AppResult<Json<DataResponse<MagazineDetail>>> {
    let magazine = MagazineRepo::find_by_id(&state.pool, magazine_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Magazine",
            id: magazine_id,
        }))?;

    let placements = MagazineContentRepo::list_for_magazine(&state.pool, magazine_id).await?;

    Ok(Json(DataResponse {
        data: MagazineDetail {
            magazine,
            content: placements,
        },
    }))
}

/// PUT /api/v1/magazines/{id}
pub async fn update_magazine(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(magazine_id): Path<DbId>,
    Json(fields): Json<UpdateMagazineFields>,
) -> AppResult<Json<DataResponse<Magazine>>> {
    let updated = state.assembler.update(&auth, magazine_id, fields).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/magazines/{id}
///
/// Returns 204 No Content on success. Published issues cannot be deleted.
pub async fn delete_magazine(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(magazine_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.assembler.delete(&auth, magazine_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/magazines/{id}/content
///
/// Place an approved content item into the issue.
pub async fn add_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(magazine_id): Path<DbId>,
    Json(input): Json<AddMagazineContent>,
) -> AppResult<impl IntoResponse> {
    let placement = state.assembler.add_content(&auth, magazine_id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: placement })))
}

/// DELETE /api/v1/magazines/{id}/content/{content_id}
///
/// Remove a content placement. Returns 204 No Content on success.
pub async fn remove_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((magazine_id, content_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    state
        .assembler
        .remove_content(&auth, magazine_id, content_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/magazines/{id}/publish
///
/// Render, store, and publish the issue.
pub async fn publish_magazine(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(magazine_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Magazine>>> {
    let published = state.assembler.publish(&auth, magazine_id).await?;
    Ok(Json(DataResponse { data: published }))
}
