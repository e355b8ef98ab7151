//! Repository for the `content` table.

use sqlx::{PgConnection, PgPool};

use inkpress_core::content::TextStats;
use inkpress_core::types::DbId;

use crate::models::content::{Content, CreateContent};

/// Column list for `content` queries.
const COLUMNS: &str = "id, title, body, excerpt, language, category, status, author_id, \
     organization_id, word_count, reading_time, version_count, created_at, updated_at";

/// Provides CRUD operations for content rows.
pub struct ContentRepo;

impl ContentRepo {
    /// Find content by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Content>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content WHERE id = $1");
        sqlx::query_as::<_, Content>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find content by id and take the row lock.
    ///
    /// This is the mutual-exclusion point for all per-content workflow
    /// operations: callers hold the lock for the duration of their
    /// transaction, serializing concurrent mutations of the same item.
    pub async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<Content>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Content>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Insert a new content row in `draft` status.
    pub async fn insert(
        conn: &mut PgConnection,
        author_id: DbId,
        input: &CreateContent,
        stats: &TextStats,
    ) -> Result<Content, sqlx::Error> {
        let query = format!(
            "INSERT INTO content (title, body, excerpt, language, category, author_id, \
                                  organization_id, word_count, reading_time, version_count) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 1) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&stats.excerpt)
            .bind(stats.language)
            .bind(&input.category)
            .bind(author_id)
            .bind(input.organization_id)
            .bind(stats.word_count)
            .bind(stats.reading_time)
            .fetch_one(&mut *conn)
            .await
    }

    /// Apply a partial update.
    ///
    /// When `stats` is present the body changed: the derived fields are
    /// rewritten and `version_count` is bumped (the caller appends the
    /// matching version snapshot in the same transaction).
    pub async fn update_fields(
        conn: &mut PgConnection,
        id: DbId,
        title: Option<&str>,
        body: Option<&str>,
        category: Option<&str>,
        stats: Option<&TextStats>,
    ) -> Result<Content, sqlx::Error> {
        let query = format!(
            "UPDATE content SET \
                 title = COALESCE($2, title), \
                 body = COALESCE($3, body), \
                 category = COALESCE($4, category), \
                 excerpt = COALESCE($5, excerpt), \
                 language = COALESCE($6, language), \
                 word_count = COALESCE($7, word_count), \
                 reading_time = COALESCE($8, reading_time), \
                 version_count = version_count + $9, \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(id)
            .bind(title)
            .bind(body)
            .bind(category)
            .bind(stats.map(|s| s.excerpt.as_str()))
            .bind(stats.map(|s| s.language))
            .bind(stats.map(|s| s.word_count))
            .bind(stats.map(|s| s.reading_time))
            .bind(if stats.is_some() { 1i32 } else { 0i32 })
            .fetch_one(&mut *conn)
            .await
    }

    /// Set the workflow status of a content row.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: DbId,
        status: &str,
    ) -> Result<Content, sqlx::Error> {
        let query = format!(
            "UPDATE content SET status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(id)
            .bind(status)
            .fetch_one(&mut *conn)
            .await
    }

    /// Delete content. Versions and reviews cascade at the store layer.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List all content, newest first.
    pub async fn list_all(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Content>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content \
             ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List content authored by a user, newest first.
    pub async fn list_by_author(
        pool: &PgPool,
        author_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Content>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content \
             WHERE author_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(author_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List content belonging to an organization, newest first.
    pub async fn list_by_organization(
        pool: &PgPool,
        organization_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Content>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content \
             WHERE organization_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(organization_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
