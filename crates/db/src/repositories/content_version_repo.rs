//! Repository for the `content_versions` table.
//!
//! Versions are immutable snapshots appended on content creation and on
//! every accepted body update; they are never mutated and are removed
//! only by the parent content's cascade delete.

use sqlx::{PgConnection, PgPool};

use inkpress_core::content::next_version_number;
use inkpress_core::types::DbId;

use crate::models::content_version::ContentVersion;

/// Column list for `content_versions` queries.
const COLUMNS: &str = "id, content_id, version_number, title, body, created_by, created_at";

/// Provides append and read operations for content version snapshots.
pub struct ContentVersionRepo;

impl ContentVersionRepo {
    /// Next sequential version number for a content item (1 if none exist).
    ///
    /// Must be called with the content row lock held so concurrent
    /// updates cannot allocate the same number.
    pub async fn next_version_number(
        conn: &mut PgConnection,
        content_id: DbId,
    ) -> Result<i32, sqlx::Error> {
        let current_max: Option<i32> = sqlx::query_scalar(
            "SELECT MAX(version_number) FROM content_versions WHERE content_id = $1",
        )
        .bind(content_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(next_version_number(current_max))
    }

    /// Append a new version snapshot.
    pub async fn insert(
        conn: &mut PgConnection,
        content_id: DbId,
        version_number: i32,
        title: &str,
        body: &str,
        created_by: DbId,
    ) -> Result<ContentVersion, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_versions (content_id, version_number, title, body, created_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentVersion>(&query)
            .bind(content_id)
            .bind(version_number)
            .bind(title)
            .bind(body)
            .bind(created_by)
            .fetch_one(&mut *conn)
            .await
    }

    /// List all versions for a content item, newest first.
    pub async fn list_by_content(
        pool: &PgPool,
        content_id: DbId,
    ) -> Result<Vec<ContentVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_versions \
             WHERE content_id = $1 \
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, ContentVersion>(&query)
            .bind(content_id)
            .fetch_all(pool)
            .await
    }
}
