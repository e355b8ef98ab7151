//! Repository for the `magazine_content` join table.

use sqlx::{PgConnection, PgPool};

use inkpress_core::types::DbId;

use crate::models::magazine_content::{MagazineArticle, MagazineContent};

/// Column list for `magazine_content` queries.
const COLUMNS: &str = "id, magazine_id, content_id, order_index, page_number";

/// Provides placement operations for content within magazine issues.
pub struct MagazineContentRepo;

impl MagazineContentRepo {
    /// Place a content item in a magazine issue.
    pub async fn insert(
        conn: &mut PgConnection,
        magazine_id: DbId,
        content_id: DbId,
        order_index: i32,
        page_number: Option<i32>,
    ) -> Result<MagazineContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO magazine_content (magazine_id, content_id, order_index, page_number) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MagazineContent>(&query)
            .bind(magazine_id)
            .bind(content_id)
            .bind(order_index)
            .bind(page_number)
            .fetch_one(&mut *conn)
            .await
    }

    /// Remove a content item from an issue. Returns `true` if a row
    /// was deleted.
    pub async fn remove(
        conn: &mut PgConnection,
        magazine_id: DbId,
        content_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM magazine_content WHERE magazine_id = $1 AND content_id = $2")
                .bind(magazine_id)
                .bind(content_id)
                .execute(&mut *conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The issue's table of contents joined against the content rows,
    /// in placement order. This is the projection handed to the
    /// renderer at publish time.
    pub async fn list_articles(
        conn: &mut PgConnection,
        magazine_id: DbId,
    ) -> Result<Vec<MagazineArticle>, sqlx::Error> {
        sqlx::query_as::<_, MagazineArticle>(
            "SELECT mc.content_id, mc.order_index, mc.page_number, \
                    c.title, c.body, c.excerpt, c.author_id \
             FROM magazine_content mc \
             JOIN content c ON c.id = mc.content_id \
             WHERE mc.magazine_id = $1 \
             ORDER BY mc.order_index ASC",
        )
        .bind(magazine_id)
        .fetch_all(&mut *conn)
        .await
    }

    /// List raw placements for an issue, in placement order.
    pub async fn list_for_magazine(
        pool: &PgPool,
        magazine_id: DbId,
    ) -> Result<Vec<MagazineContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM magazine_content \
             WHERE magazine_id = $1 \
             ORDER BY order_index ASC"
        );
        sqlx::query_as::<_, MagazineContent>(&query)
            .bind(magazine_id)
            .fetch_all(pool)
            .await
    }
}
