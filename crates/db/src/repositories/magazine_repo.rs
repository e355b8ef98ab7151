//! Repository for the `magazines` table.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};

use inkpress_core::magazine::MAGAZINE_STATUS_PUBLISHED;
use inkpress_core::types::DbId;

use crate::models::magazine::{CreateMagazine, Magazine};

/// Column list for `magazines` queries.
const COLUMNS: &str = "id, title, description, issue_number, volume_number, status, \
     organization_id, created_by, pdf_url, publication_date, created_at, updated_at";

/// Provides CRUD operations for magazine issues.
pub struct MagazineRepo;

impl MagazineRepo {
    /// Find a magazine by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Magazine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM magazines WHERE id = $1");
        sqlx::query_as::<_, Magazine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a magazine by id and take the row lock.
    ///
    /// Serializes concurrent mutations of one issue, including the
    /// publish sequence.
    pub async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<Magazine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM magazines WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Magazine>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Insert a new magazine issue in `draft` status.
    pub async fn insert(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateMagazine,
    ) -> Result<Magazine, sqlx::Error> {
        let query = format!(
            "INSERT INTO magazines (title, description, issue_number, volume_number, \
                                    publication_date, organization_id, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Magazine>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.issue_number)
            .bind(input.volume_number)
            .bind(input.publication_date)
            .bind(input.organization_id)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update to a draft issue.
    pub async fn update_fields(
        conn: &mut PgConnection,
        id: DbId,
        title: Option<&str>,
        description: Option<&str>,
        publication_date: Option<NaiveDate>,
    ) -> Result<Magazine, sqlx::Error> {
        let query = format!(
            "UPDATE magazines SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 publication_date = COALESCE($4, publication_date), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Magazine>(&query)
            .bind(id)
            .bind(title)
            .bind(description)
            .bind(publication_date)
            .fetch_one(&mut *conn)
            .await
    }

    /// Mark a magazine as published in a single statement.
    ///
    /// Status, artifact URL, and publication date land together so a
    /// failed render earlier in the sequence leaves the row untouched.
    pub async fn set_published(
        conn: &mut PgConnection,
        id: DbId,
        pdf_url: &str,
        publication_date: NaiveDate,
    ) -> Result<Magazine, sqlx::Error> {
        let query = format!(
            "UPDATE magazines SET \
                 status = $2, \
                 pdf_url = $3, \
                 publication_date = $4, \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Magazine>(&query)
            .bind(id)
            .bind(MAGAZINE_STATUS_PUBLISHED)
            .bind(pdf_url)
            .bind(publication_date)
            .fetch_one(&mut *conn)
            .await
    }

    /// Delete a magazine. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM magazines WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List magazines for an organization, newest first.
    pub async fn list_by_organization(
        pool: &PgPool,
        organization_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Magazine>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM magazines \
             WHERE organization_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Magazine>(&query)
            .bind(organization_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
