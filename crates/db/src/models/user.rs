//! User entity model.
//!
//! Identity management is external; this is the projection the workflow
//! needs for authorization and notification targeting.

use serde::Serialize;
use sqlx::FromRow;

use inkpress_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}
