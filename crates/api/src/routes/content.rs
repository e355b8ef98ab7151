//! Route definitions for the `/content` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Routes mounted at `/content`.
///
/// ```text
/// GET    /                -> list_content
/// POST   /                -> create_content
/// GET    /{id}            -> get_content
/// PUT    /{id}            -> update_content
/// DELETE /{id}            -> delete_content
/// POST   /{id}/submit     -> submit_content
/// GET    /{id}/versions   -> list_versions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(content::list_content).post(content::create_content))
        .route(
            "/{id}",
            get(content::get_content)
                .put(content::update_content)
                .delete(content::delete_content),
        )
        .route("/{id}/submit", post(content::submit_content))
        .route("/{id}/versions", get(content::list_versions))
}
