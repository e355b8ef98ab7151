//! Real-time broadcast: routes workflow events to WebSocket scopes and
//! persisted user notifications.

mod router;

pub use router::NotificationRouter;
