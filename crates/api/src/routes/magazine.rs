//! Route definitions for the `/magazines` resource.
//!
//! All endpoints require authentication; mutations additionally require
//! the editor or admin role.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::magazine;
use crate::state::AppState;

/// Routes mounted at `/magazines`.
///
/// ```text
/// GET    /                              -> list_magazines
/// POST   /                              -> create_magazine
/// GET    /{id}                          -> get_magazine
/// PUT    /{id}                          -> update_magazine
/// DELETE /{id}                          -> delete_magazine
/// POST   /{id}/content                  -> add_content
/// DELETE /{id}/content/{content_id}     -> remove_content
/// POST   /{id}/publish                  -> publish_magazine
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(magazine::list_magazines).post(magazine::create_magazine),
        )
        .route(
            "/{id}",
            get(magazine::get_magazine)
                .put(magazine::update_magazine)
                .delete(magazine::delete_magazine),
        )
        .route("/{id}/content", post(magazine::add_content))
        .route(
            "/{id}/content/{content_id}",
            delete(magazine::remove_content),
        )
        .route("/{id}/publish", post(magazine::publish_magazine))
}
