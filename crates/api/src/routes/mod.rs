pub mod content;
pub mod health;
pub mod magazine;
pub mod notification;
pub mod review;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                      WebSocket (token via query param)
///
/// /content                                 list, create
/// /content/{id}                            get, update, delete
/// /content/{id}/submit                     submit for review (POST)
/// /content/{id}/versions                   version history (GET)
///
/// /reviews                                 assign (POST)
/// /reviews/{id}/complete                   complete review (PUT)
/// /reviews/mine                            reviewer's assignments (GET)
/// /reviews/content/{content_id}            reviews for content (GET)
///
/// /magazines                               list, create
/// /magazines/{id}                          get, update, delete
/// /magazines/{id}/content                  place content (POST)
/// /magazines/{id}/content/{content_id}     remove placement (DELETE)
/// /magazines/{id}/publish                  render + publish (POST)
///
/// /notifications                           list (GET)
/// /notifications/read-all                  mark all read (POST)
/// /notifications/unread-count              unread count (GET)
/// /notifications/{id}/read                 mark read (POST)
/// /notifications/{id}                      delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/content", content::router())
        .nest("/reviews", review::router())
        .nest("/magazines", magazine::router())
        .nest("/notifications", notification::router())
}
