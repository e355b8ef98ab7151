//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for
//! [`WorkflowEvent`]s. It is designed to be shared via `Arc<EventBus>`
//! across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use inkpress_core::types::DbId;

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// The delivery room a workflow event targets.
///
/// Rendered as `user:<id>`, `organization:<id>`, or `content:<id>`, the
/// same strings clients use to subscribe over WebSocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Scope {
    User(DbId),
    Organization(DbId),
    Content(DbId),
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::User(id) => write!(f, "user:{id}"),
            Scope::Organization(id) => write!(f, "organization:{id}"),
            Scope::Content(id) => write!(f, "content:{id}"),
        }
    }
}

// ---------------------------------------------------------------------------
// WorkflowEvent
// ---------------------------------------------------------------------------

/// A domain event emitted by a workflow transition.
///
/// Constructed via [`WorkflowEvent::new`] and enriched with the builder
/// methods [`with_actor`](WorkflowEvent::with_actor) and
/// [`with_payload`](WorkflowEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowEvent {
    /// Dot-separated event name, e.g. `"content.approved"`.
    pub event_type: String,

    /// The room this event is delivered to in real time.
    pub scope: Scope,

    /// Id of the user whose operation produced the event.
    pub actor_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl WorkflowEvent {
    /// Create a new event with the required name and scope.
    pub fn new(event_type: impl Into<String>, scope: Scope) -> Self {
        Self {
            event_type: event_type.into(),
            scope,
            actor_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the acting user to the event.
    pub fn with_actor(mut self, actor_id: DbId) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`WorkflowEvent`].
pub struct EventBus {
    sender: broadcast::Sender<WorkflowEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are
    /// dropped and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Never blocks and never fails the caller: with zero subscribers
    /// the event is silently dropped. The notification router (when
    /// subscribed) writes the durable record.
    pub fn publish(&self, event: WorkflowEvent) {
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_renders_room_names() {
        assert_eq!(Scope::User(7).to_string(), "user:7");
        assert_eq!(Scope::Organization(3).to_string(), "organization:3");
        assert_eq!(Scope::Content(42).to_string(), "content:42");
    }

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = WorkflowEvent::new("content.approved", Scope::Content(42))
            .with_actor(7)
            .with_payload(serde_json::json!({"average_rating": 3.5}));

        bus.publish(event);

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, "content.approved");
        assert_eq!(received.scope, Scope::Content(42));
        assert_eq!(received.actor_id, Some(7));
        assert_eq!(received.payload["average_rating"], 3.5);
    }

    #[tokio::test]
    async fn subscribers_observe_publish_order() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(WorkflowEvent::new("review.assigned", Scope::Content(1)));
        bus.publish(WorkflowEvent::new("review.completed", Scope::Content(1)));
        bus.publish(WorkflowEvent::new("content.approved", Scope::Content(1)));

        assert_eq!(rx.recv().await.unwrap().event_type, "review.assigned");
        assert_eq!(rx.recv().await.unwrap().event_type, "review.completed");
        assert_eq!(rx.recv().await.unwrap().event_type, "content.approved");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(WorkflowEvent::new("magazine.published", Scope::Organization(5)));

        assert_eq!(rx1.recv().await.unwrap().event_type, "magazine.published");
        assert_eq!(rx2.recv().await.unwrap().event_type, "magazine.published");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(WorkflowEvent::new("content.submitted", Scope::Content(9)));
    }
}
