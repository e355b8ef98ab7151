//! Content version snapshot model.

use serde::Serialize;
use sqlx::FromRow;

use inkpress_core::types::{DbId, Timestamp};

/// A row from the `content_versions` table.
///
/// Versions are immutable snapshots created on content creation and on
/// every accepted body update. `version_number` is a gapless 1-based
/// sequence per content item.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentVersion {
    pub id: DbId,
    pub content_id: DbId,
    pub version_number: i32,
    pub title: String,
    pub body: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
}
