//! Notification entity model.

use serde::Serialize;
use sqlx::FromRow;

use inkpress_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
///
/// Created by the notification router as a side effect of workflow
/// transitions; mutated only to flip `is_read`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub is_read: bool,
    pub created_at: Timestamp,
}
