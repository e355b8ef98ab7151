//! Handlers for the `/content` resource.
//!
//! All endpoints require authentication via [`AuthUser`]. Mutating
//! operations delegate to [`ContentWorkflow`](crate::workflow::ContentWorkflow);
//! reads go straight to the repositories.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use inkpress_core::error::CoreError;
use inkpress_core::types::DbId;
use inkpress_db::models::content::{Content, CreateContent, UpdateContentFields};
use inkpress_db::models::content_version::ContentVersion;
use inkpress_db::repositories::{ContentRepo, ContentVersionRepo};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /content`.
#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    /// Restrict to one author's content.
    pub author_id: Option<DbId>,
    /// Restrict to one organization's content.
    pub organization_id: Option<DbId>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Maximum page size for content listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for content listing.
const DEFAULT_LIMIT: i64 = 50;

/// POST /api/v1/content
///
/// Create new content in `draft` status.
pub async fn create_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateContent>,
) -> AppResult<impl IntoResponse> {
    let created = state.workflow.create(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/content
///
/// List content, optionally filtered by author or organization.
pub async fn list_content(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ContentQuery>,
) -> AppResult<Json<DataResponse<Vec<Content>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let items = match (params.author_id, params.organization_id) {
        (Some(author_id), _) => {
            ContentRepo::list_by_author(&state.pool, author_id, limit, offset).await?
        }
        (None, Some(org_id)) => {
            ContentRepo::list_by_organization(&state.pool, org_id, limit, offset).await?
        }
        (None, None) => ContentRepo::list_all(&state.pool, limit, offset).await?,
    };

    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/content/{id}
pub async fn get_content(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(content_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Content>>> {
    let content = ContentRepo::find_by_id(&state.pool, content_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id: content_id,
        }))?;

    Ok(Json(DataResponse { data: content }))
}

/// PUT /api/v1/content/{id}
///
/// Apply a partial update. A body change appends a version snapshot.
pub async fn update_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(content_id): Path<DbId>,
    Json(fields): Json<UpdateContentFields>,
) -> AppResult<Json<DataResponse<Content>>> {
    let updated = state.workflow.update(&auth, content_id, fields).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/content/{id}
///
/// Returns 204 No Content on success.
pub async fn delete_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(content_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.workflow.delete(&auth, content_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/content/{id}/submit
///
/// Submit draft content for review.
pub async fn submit_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(content_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Content>>> {
    let submitted = state.workflow.submit(&auth, content_id).await?;
    Ok(Json(DataResponse { data: submitted }))
}

/// GET /api/v1/content/{id}/versions
///
/// List all version snapshots, newest first.
pub async fn list_versions(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(content_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ContentVersion>>>> {
    // 404 for unknown content rather than an empty list.
    ContentRepo::find_by_id(&state.pool, content_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id: content_id,
        }))?;

    let versions = ContentVersionRepo::list_by_content(&state.pool, content_id).await?;
    Ok(Json(DataResponse { data: versions }))
}
