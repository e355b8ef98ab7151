//! Repository for the `reviews` table.

use sqlx::{PgConnection, PgPool};

use inkpress_core::review::REVIEW_STATUS_COMPLETED;
use inkpress_core::types::DbId;

use crate::models::review::{Review, ReviewScores};

/// Column list for `reviews` queries.
const COLUMNS: &str = "id, content_id, reviewer_id, status, rating, grammar_score, \
     creativity_score, relevance_score, feedback, completed_at, created_at, updated_at";

/// Provides CRUD operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Find a review by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Re-read a review inside a caller-owned transaction.
    pub async fn find_by_id_in_tx(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Find a review by its `(content_id, reviewer_id)` pair.
    pub async fn find_by_content_and_reviewer(
        conn: &mut PgConnection,
        content_id: DbId,
        reviewer_id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM reviews WHERE content_id = $1 AND reviewer_id = $2");
        sqlx::query_as::<_, Review>(&query)
            .bind(content_id)
            .bind(reviewer_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Insert a new review in `pending` status.
    pub async fn insert(
        conn: &mut PgConnection,
        content_id: DbId,
        reviewer_id: DbId,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (content_id, reviewer_id) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(content_id)
            .bind(reviewer_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Complete a review: store scores, set `status = completed`, and
    /// stamp `completed_at`. The stamp only applies on the first
    /// completion; a re-completion never moves the timestamp.
    pub async fn complete(
        conn: &mut PgConnection,
        id: DbId,
        scores: &ReviewScores,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET \
                 status = $2, \
                 rating = COALESCE($3, rating), \
                 grammar_score = COALESCE($4, grammar_score), \
                 creativity_score = COALESCE($5, creativity_score), \
                 relevance_score = COALESCE($6, relevance_score), \
                 feedback = COALESCE($7, feedback), \
                 completed_at = COALESCE(completed_at, NOW()), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(REVIEW_STATUS_COMPLETED)
            .bind(scores.rating)
            .bind(scores.grammar_score)
            .bind(scores.creativity_score)
            .bind(scores.relevance_score)
            .bind(&scores.feedback)
            .fetch_one(&mut *conn)
            .await
    }

    /// List all reviews for a content item inside a caller-owned
    /// transaction (the aggregation read of the review round).
    pub async fn list_by_content_in_tx(
        conn: &mut PgConnection,
        content_id: DbId,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews \
             WHERE content_id = $1 \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(content_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// List all reviews for a content item.
    pub async fn list_by_content(
        pool: &PgPool,
        content_id: DbId,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews \
             WHERE content_id = $1 \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(content_id)
            .fetch_all(pool)
            .await
    }

    /// List reviews assigned to a reviewer, newest first.
    pub async fn list_by_reviewer(
        pool: &PgPool,
        reviewer_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews \
             WHERE reviewer_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(reviewer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
