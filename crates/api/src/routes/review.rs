//! Route definitions for the `/reviews` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// POST   /                        -> assign_review (editors/admins)
/// PUT    /{id}/complete           -> complete_review
/// GET    /mine                    -> list_mine
/// GET    /content/{content_id}    -> list_for_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(review::assign_review))
        .route("/{id}/complete", put(review::complete_review))
        .route("/mine", get(review::list_mine))
        .route("/content/{content_id}", get(review::list_for_content))
}
