//! Review entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use inkpress_core::types::{DbId, Timestamp};

/// A row from the `reviews` table.
///
/// At most one review exists per `(content_id, reviewer_id)` pair.
/// `completed_at` is set exactly once, when the review first reaches
/// `completed`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub content_id: DbId,
    pub reviewer_id: DbId,
    pub status: String,
    pub rating: Option<i32>,
    pub grammar_score: Option<i32>,
    pub creativity_score: Option<i32>,
    pub relevance_score: Option<i32>,
    pub feedback: Option<String>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for assigning a reviewer to content.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssignReview {
    pub content_id: DbId,
    pub reviewer_id: DbId,
}

/// Scores and feedback submitted when completing a review.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReviewScores {
    pub rating: Option<i32>,
    pub grammar_score: Option<i32>,
    pub creativity_score: Option<i32>,
    pub relevance_score: Option<i32>,
    pub feedback: Option<String>,
}
