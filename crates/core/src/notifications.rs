//! Workflow event names and the notification types derived from them.
//!
//! Event names are dot-separated (`content.approved`); notification type
//! strings are the snake_case values persisted in the `notifications`
//! table. `notification_type_for` maps between the two.

/* --------------------------------------------------------------------------
Event names published on the bus
-------------------------------------------------------------------------- */

pub const EVENT_CONTENT_SUBMITTED: &str = "content.submitted";
pub const EVENT_CONTENT_UPDATED: &str = "content.updated";
pub const EVENT_REVIEW_ASSIGNED: &str = "review.assigned";
pub const EVENT_REVIEW_COMPLETED: &str = "review.completed";
pub const EVENT_CONTENT_APPROVED: &str = "content.approved";
pub const EVENT_CONTENT_REJECTED: &str = "content.rejected";
pub const EVENT_MAGAZINE_PUBLISHED: &str = "magazine.published";

/* --------------------------------------------------------------------------
Persisted notification types
-------------------------------------------------------------------------- */

pub const NOTIFY_CONTENT_SUBMITTED: &str = "content_submitted";
pub const NOTIFY_REVIEW_ASSIGNED: &str = "review_assigned";
pub const NOTIFY_REVIEW_COMPLETED: &str = "review_completed";
pub const NOTIFY_CONTENT_APPROVED: &str = "content_approved";
pub const NOTIFY_CONTENT_REJECTED: &str = "content_rejected";
pub const NOTIFY_MAGAZINE_PUBLISHED: &str = "magazine_published";

/// All valid notification type values.
pub const VALID_NOTIFICATION_TYPES: &[&str] = &[
    NOTIFY_CONTENT_SUBMITTED,
    NOTIFY_REVIEW_ASSIGNED,
    NOTIFY_REVIEW_COMPLETED,
    NOTIFY_CONTENT_APPROVED,
    NOTIFY_CONTENT_REJECTED,
    NOTIFY_MAGAZINE_PUBLISHED,
];

/// The notification type persisted for a given workflow event, if any.
///
/// Events with no durable notification (live collaboration traffic,
/// `content.updated`) return `None`.
pub fn notification_type_for(event_type: &str) -> Option<&'static str> {
    match event_type {
        EVENT_CONTENT_SUBMITTED => Some(NOTIFY_CONTENT_SUBMITTED),
        EVENT_REVIEW_ASSIGNED => Some(NOTIFY_REVIEW_ASSIGNED),
        EVENT_REVIEW_COMPLETED => Some(NOTIFY_REVIEW_COMPLETED),
        EVENT_CONTENT_APPROVED => Some(NOTIFY_CONTENT_APPROVED),
        EVENT_CONTENT_REJECTED => Some(NOTIFY_CONTENT_REJECTED),
        EVENT_MAGAZINE_PUBLISHED => Some(NOTIFY_MAGAZINE_PUBLISHED),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_durable_event_maps_to_a_valid_type() {
        for event in [
            EVENT_CONTENT_SUBMITTED,
            EVENT_REVIEW_ASSIGNED,
            EVENT_REVIEW_COMPLETED,
            EVENT_CONTENT_APPROVED,
            EVENT_CONTENT_REJECTED,
            EVENT_MAGAZINE_PUBLISHED,
        ] {
            let ty = notification_type_for(event).expect("durable event");
            assert!(VALID_NOTIFICATION_TYPES.contains(&ty));
        }
    }

    #[test]
    fn live_only_events_have_no_notification_type() {
        assert_eq!(notification_type_for(EVENT_CONTENT_UPDATED), None);
        assert_eq!(notification_type_for("unknown.event"), None);
    }
}
