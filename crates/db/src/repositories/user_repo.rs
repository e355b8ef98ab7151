//! Repository for the `users` and `organization_members` tables.
//!
//! Identity lifecycle (signup, password, profile) lives elsewhere; the
//! workflow only reads users for authorization checks and notification
//! fan-out.

use sqlx::PgPool;

use inkpress_core::roles::{ROLE_ADMIN, ROLE_EDITOR};
use inkpress_core::types::DbId;

use crate::models::user::User;

/// Column list for `users` queries.
const COLUMNS: &str = "id, email, first_name, last_name, role, is_active, created_at";

/// Read-only access to users and organization membership.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Ids of every active member of an organization.
    pub async fn list_organization_member_ids(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT u.id FROM users u \
             JOIN organization_members om ON om.user_id = u.id \
             WHERE om.organization_id = $1 AND u.is_active = TRUE",
        )
        .bind(organization_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Ids of an organization's active admins and editors. These are
    /// the users who triage newly submitted content.
    pub async fn list_organization_staff_ids(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT u.id FROM users u \
             JOIN organization_members om ON om.user_id = u.id \
             WHERE om.organization_id = $1 AND u.is_active = TRUE \
               AND u.role IN ($2, $3)",
        )
        .bind(organization_id)
        .bind(ROLE_ADMIN)
        .bind(ROLE_EDITOR)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
