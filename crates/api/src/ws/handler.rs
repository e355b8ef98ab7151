use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use inkpress_core::error::CoreError;
use inkpress_core::types::DbId;
use inkpress_events::Scope;

use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::ws::manager::WsManager;

/// Query parameters for the WebSocket upgrade request.
///
/// Browsers cannot set an `Authorization` header on a WebSocket upgrade,
/// so the access token is passed as a query parameter instead.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub token: String,
}

/// Messages clients may send after the connection is established.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage {
    /// Subscribe to a content item's scope for live workflow updates.
    #[serde(rename = "content:join")]
    ContentJoin { content_id: DbId },
    /// Leave a content item's scope.
    #[serde(rename = "content:leave")]
    ContentLeave { content_id: DbId },
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// The token is validated before the upgrade; unauthenticated requests
/// are rejected with 401. After the upgrade the connection is registered
/// with `WsManager`, pre-subscribed to the user's own scope (and their
/// organization's, if any), and managed by two tasks (sender + receiver).
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<WsQuery>,
) -> AppResult<impl IntoResponse> {
    let claims = validate_token(&params.token, &state.config.jwt)
        .map_err(|_| AppError::Core(CoreError::Unauthorized("Invalid or expired token".into())))?;

    let user_id = claims.sub;
    let organization_id = claims.organization_id;

    Ok(ws.on_upgrade(move |socket| {
        handle_socket(socket, state.ws_manager, user_id, organization_id)
    }))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Processes inbound scope subscription messages on the current task.
///   4. Cleans up on disconnect.
async fn handle_socket(
    socket: WebSocket,
    ws_manager: Arc<WsManager>,
    user_id: DbId,
    organization_id: Option<DbId>,
) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket connected");

    let mut initial_scopes = vec![Scope::User(user_id).to_string()];
    if let Some(org_id) = organization_id {
        initial_scopes.push(Scope::Organization(org_id).to_string());
    }

    // Register and get the receiver for outbound messages.
    let mut rx = ws_manager.add(conn_id.clone(), user_id, initial_scopes).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: process inbound messages.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(Message::Text(text)) => {
                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::ContentJoin { content_id }) => {
                        let scope = Scope::Content(content_id).to_string();
                        tracing::debug!(conn_id = %conn_id, %scope, "Scope joined");
                        ws_manager.subscribe_scope(&conn_id, scope).await;
                    }
                    Ok(ClientMessage::ContentLeave { content_id }) => {
                        let scope = Scope::Content(content_id).to_string();
                        tracing::debug!(conn_id = %conn_id, %scope, "Scope left");
                        ws_manager.unsubscribe_scope(&conn_id, &scope).await;
                    }
                    Err(e) => {
                        tracing::debug!(conn_id = %conn_id, error = %e, "Unrecognized client message");
                    }
                }
            }
            Ok(_msg) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection and abort sender task.
    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}
