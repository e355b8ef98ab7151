//! Content entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use inkpress_core::types::{DbId, Timestamp};

/// A row from the `content` table.
///
/// `word_count`, `reading_time`, `excerpt`, and `language` are derived
/// from `body` and recomputed on every body change. `version_count`
/// tracks the number of snapshots in `content_versions`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Content {
    pub id: DbId,
    pub title: String,
    pub body: String,
    pub excerpt: String,
    pub language: String,
    pub category: Option<String>,
    pub status: String,
    pub author_id: DbId,
    pub organization_id: Option<DbId>,
    pub word_count: i32,
    pub reading_time: i32,
    pub version_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating new content.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateContent {
    pub title: String,
    pub body: String,
    pub category: Option<String>,
    pub organization_id: Option<DbId>,
}

/// DTO for updating existing content. All fields are optional; fields
/// not named here are rejected during deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateContentFields {
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
}

impl UpdateContentFields {
    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.category.is_none()
    }
}
