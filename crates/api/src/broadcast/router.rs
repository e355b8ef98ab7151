//! Event-to-notification routing engine.
//!
//! [`NotificationRouter`] subscribes to the workflow event bus and, for
//! each event, pushes a live update into the event's scope, then
//! persists a notification row per affected user and pushes it to that
//! user's connections.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;

use inkpress_core::notifications::{
    notification_type_for, EVENT_CONTENT_APPROVED, EVENT_CONTENT_REJECTED,
    EVENT_CONTENT_SUBMITTED, EVENT_MAGAZINE_PUBLISHED, EVENT_REVIEW_ASSIGNED,
    EVENT_REVIEW_COMPLETED,
};
use inkpress_core::types::DbId;
use inkpress_db::repositories::{NotificationRepo, UserRepo};
use inkpress_db::DbPool;
use inkpress_events::{Scope, WorkflowEvent};

use crate::ws::WsManager;

/// Routes workflow events to scope subscribers and user notifications.
///
/// Consumes events from the broadcast channel; delivery is best-effort
/// and an error routing one event never stops the loop.
pub struct NotificationRouter {
    pool: DbPool,
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    /// Create a new router with the given database pool and WebSocket manager.
    pub fn new(pool: DbPool, ws_manager: Arc<WsManager>) -> Self {
        Self { pool, ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](inkpress_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<WorkflowEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.route_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to route event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Route a single event: scope broadcast first, then per-user
    /// notifications.
    async fn route_event(&self, event: &WorkflowEvent) -> Result<(), sqlx::Error> {
        let scope_msg = serde_json::json!({
            "type": "event",
            "event_type": event.event_type,
            "payload": event.payload,
            "timestamp": event.timestamp,
        });
        self.ws_manager
            .send_to_scope(
                &event.scope.to_string(),
                Message::Text(scope_msg.to_string().into()),
            )
            .await;

        // Some events (e.g. content.updated) are live-only.
        let Some(notification_type) = notification_type_for(&event.event_type) else {
            return Ok(());
        };

        let targets = self.determine_targets(event).await?;
        let (title, message) = describe(event);

        for user_id in targets {
            self.deliver(user_id, notification_type, &title, &message, event)
                .await;
        }

        Ok(())
    }

    /// Determine which users should receive a notification for the event.
    async fn determine_targets(&self, event: &WorkflowEvent) -> Result<Vec<DbId>, sqlx::Error> {
        match event.event_type.as_str() {
            // New submissions go to the organization's triage staff.
            EVENT_CONTENT_SUBMITTED => match event.scope {
                Scope::Organization(org_id) => {
                    UserRepo::list_organization_staff_ids(&self.pool, org_id).await
                }
                _ => Ok(vec![]),
            },

            // Both the new reviewer and the author hear about assignments.
            EVENT_REVIEW_ASSIGNED => Ok(payload_ids(event, &["reviewer_id", "author_id"])),

            // Review completion and round outcomes go to the author.
            EVENT_REVIEW_COMPLETED | EVENT_CONTENT_APPROVED | EVENT_CONTENT_REJECTED => {
                Ok(payload_ids(event, &["author_id"]))
            }

            // Publication announcements go to the whole organization.
            EVENT_MAGAZINE_PUBLISHED => match event.scope {
                Scope::Organization(org_id) => {
                    UserRepo::list_organization_member_ids(&self.pool, org_id).await
                }
                _ => Ok(payload_ids(event, &["created_by"])),
            },

            _ => Ok(vec![]),
        }
    }

    /// Create a notification record in the database and push a WebSocket message.
    async fn deliver(
        &self,
        user_id: DbId,
        notification_type: &str,
        title: &str,
        message: &str,
        event: &WorkflowEvent,
    ) {
        if let Err(e) = NotificationRepo::create(
            &self.pool,
            user_id,
            notification_type,
            title,
            message,
            Some(&event.payload),
        )
        .await
        {
            tracing::error!(error = %e, user_id, "Failed to persist notification");
        }

        let msg = serde_json::json!({
            "type": "notification",
            "notification_type": notification_type,
            "title": title,
            "message": message,
            "payload": event.payload,
            "timestamp": event.timestamp,
        });
        self.ws_manager
            .send_to_user(user_id, Message::Text(msg.to_string().into()))
            .await;
    }
}

/// Extract database ids from the listed payload keys, skipping absent ones.
fn payload_ids(event: &WorkflowEvent, keys: &[&str]) -> Vec<DbId> {
    keys.iter()
        .filter_map(|key| event.payload.get(key).and_then(|v| v.as_i64()))
        .collect()
}

/// Human-readable title and message for a notification.
fn describe(event: &WorkflowEvent) -> (String, String) {
    let content_title = event
        .payload
        .get("title")
        .and_then(|v| v.as_str())
        .unwrap_or("content");

    match event.event_type.as_str() {
        EVENT_CONTENT_SUBMITTED => (
            "New submission".to_string(),
            format!("\"{content_title}\" was submitted for review"),
        ),
        EVENT_REVIEW_ASSIGNED => (
            "Review assigned".to_string(),
            "A review assignment was created".to_string(),
        ),
        EVENT_REVIEW_COMPLETED => (
            "Review completed".to_string(),
            "A reviewer finished reviewing your content".to_string(),
        ),
        EVENT_CONTENT_APPROVED => (
            "Content approved".to_string(),
            "Your content passed review and was approved".to_string(),
        ),
        EVENT_CONTENT_REJECTED => (
            "Content rejected".to_string(),
            "Your content did not pass review".to_string(),
        ),
        EVENT_MAGAZINE_PUBLISHED => (
            "Magazine published".to_string(),
            format!("\"{content_title}\" is now published"),
        ),
        other => (other.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_ids_skips_missing_keys() {
        let event = WorkflowEvent::new(EVENT_REVIEW_ASSIGNED, Scope::Content(1)).with_payload(
            serde_json::json!({ "reviewer_id": 9, "content_id": 1 }),
        );
        let ids = payload_ids(&event, &["reviewer_id", "author_id"]);
        assert_eq!(ids, vec![9]);
    }

    #[test]
    fn describe_names_the_submission() {
        let event = WorkflowEvent::new(EVENT_CONTENT_SUBMITTED, Scope::Organization(3))
            .with_payload(serde_json::json!({ "title": "Monsoon Letters" }));
        let (title, message) = describe(&event);
        assert_eq!(title, "New submission");
        assert!(message.contains("Monsoon Letters"));
    }
}
