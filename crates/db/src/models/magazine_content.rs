//! Magazine/content join entity and the article projection used for
//! rendering.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use inkpress_core::types::DbId;

/// A row from the `magazine_content` table.
///
/// Unique per `(magazine_id, content_id)`. The referenced content was
/// `approved` at insertion time; the status is not re-checked afterward.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MagazineContent {
    pub id: DbId,
    pub magazine_id: DbId,
    pub content_id: DbId,
    pub order_index: i32,
    pub page_number: Option<i32>,
}

/// DTO for adding content to a magazine.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddMagazineContent {
    pub content_id: DbId,
    pub order_index: i32,
    pub page_number: Option<i32>,
}

/// An ordered article within a magazine, joined with its content fields
/// for rendering and listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MagazineArticle {
    pub content_id: DbId,
    pub order_index: i32,
    pub page_number: Option<i32>,
    pub title: String,
    pub body: String,
    pub excerpt: String,
    pub author_id: DbId,
}
