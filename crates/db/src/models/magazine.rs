//! Magazine entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use inkpress_core::types::{DbId, Timestamp};

/// A row from the `magazines` table.
///
/// `(organization_id, issue_number, volume_number)` identifies at most
/// one magazine.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Magazine {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub issue_number: i32,
    pub volume_number: i32,
    pub publication_date: Option<NaiveDate>,
    pub organization_id: Option<DbId>,
    pub status: String,
    pub pdf_url: Option<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a magazine issue.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMagazine {
    pub title: String,
    pub description: Option<String>,
    pub issue_number: i32,
    pub volume_number: i32,
    pub publication_date: Option<NaiveDate>,
    pub organization_id: Option<DbId>,
}

/// DTO for updating a magazine. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateMagazineFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub publication_date: Option<NaiveDate>,
}
