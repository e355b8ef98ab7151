//! Handlers for the `/reviews` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use inkpress_core::types::DbId;
use inkpress_db::models::content::Content;
use inkpress_db::models::review::{AssignReview, Review, ReviewScores};
use inkpress_db::repositories::ReviewRepo;

use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /reviews/mine`.
#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Maximum page size for review listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for review listing.
const DEFAULT_LIMIT: i64 = 50;

/// Result of completing a review: the review itself plus the content,
/// whose status changes when the completion closed the round.
#[derive(Debug, Serialize)]
pub struct ReviewOutcome {
    pub review: Review,
    pub content: Content,
}

/// POST /api/v1/reviews
///
/// Assign a reviewer to submitted content (editors and admins only).
pub async fn assign_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<AssignReview>,
) -> AppResult<impl IntoResponse> {
    let created = state.workflow.assign_review(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/reviews/{id}/complete
///
/// Complete a review with scores and feedback. May close the review
/// round, in which case the returned content carries the new status.
pub async fn complete_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(review_id): Path<DbId>,
    Json(scores): Json<ReviewScores>,
) -> AppResult<Json<DataResponse<ReviewOutcome>>> {
    let (review, content) = state
        .workflow
        .complete_review(&auth, review_id, scores)
        .await?;

    Ok(Json(DataResponse {
        data: ReviewOutcome { review, content },
    }))
}

/// GET /api/v1/reviews/content/{content_id}
///
/// List all reviews for a content item, oldest first.
pub async fn list_for_content(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(content_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Review>>>> {
    let reviews = ReviewRepo::list_by_content(&state.pool, content_id).await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// GET /api/v1/reviews/mine
///
/// List the authenticated reviewer's assignments, newest first.
pub async fn list_mine(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ReviewQuery>,
) -> AppResult<Json<DataResponse<Vec<Review>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let reviews = ReviewRepo::list_by_reviewer(&state.pool, auth.user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: reviews }))
}
