//! Review status constants, score validation, and the round aggregation
//! rule that decides whether reviewed content is approved or rejected.

use crate::content::{STATUS_APPROVED, STATUS_REJECTED};
use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Status constants
-------------------------------------------------------------------------- */

pub const REVIEW_STATUS_PENDING: &str = "pending";
pub const REVIEW_STATUS_IN_PROGRESS: &str = "in_progress";
pub const REVIEW_STATUS_COMPLETED: &str = "completed";

/// All valid review status values.
pub const VALID_REVIEW_STATUSES: &[&str] = &[
    REVIEW_STATUS_PENDING,
    REVIEW_STATUS_IN_PROGRESS,
    REVIEW_STATUS_COMPLETED,
];

/* --------------------------------------------------------------------------
Score bounds
-------------------------------------------------------------------------- */

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;
pub const MIN_SUB_SCORE: i32 = 0;
pub const MAX_SUB_SCORE: i32 = 100;
pub const MAX_FEEDBACK_LENGTH: usize = 2_000;

/// Validate an overall rating (1-5 scale).
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )))
    }
}

/// Validate a grammar/creativity/relevance sub-score (0-100 scale).
pub fn validate_sub_score(name: &str, score: i32) -> Result<(), CoreError> {
    if (MIN_SUB_SCORE..=MAX_SUB_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{name} must be between {MIN_SUB_SCORE} and {MAX_SUB_SCORE}"
        )))
    }
}

/// Validate free-form reviewer feedback.
pub fn validate_feedback(feedback: &str) -> Result<(), CoreError> {
    if feedback.len() > MAX_FEEDBACK_LENGTH {
        return Err(CoreError::Validation(format!(
            "Feedback exceeds maximum length of {MAX_FEEDBACK_LENGTH} characters"
        )));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Round aggregation
-------------------------------------------------------------------------- */

/// Approval policy for a completed review round.
///
/// The threshold is deployment configuration, not business law: loaded
/// from `REVIEW_APPROVAL_THRESHOLD` and injected into the workflow.
#[derive(Debug, Clone, Copy)]
pub struct ReviewPolicy {
    /// Minimum average rating for approval. A mean exactly at the
    /// threshold approves.
    pub approval_threshold: f64,
}

/// Default approval threshold on the 1-5 rating scale.
pub const DEFAULT_APPROVAL_THRESHOLD: f64 = 3.0;

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD,
        }
    }
}

/// One review's contribution to the round decision.
///
/// Every completed review counts equally regardless of reviewer role;
/// there is no weighting.
#[derive(Debug, Clone)]
pub struct ReviewBallot {
    pub reviewer_id: DbId,
    pub status: String,
    pub rating: Option<i32>,
}

impl ReviewBallot {
    fn is_completed(&self) -> bool {
        self.status == REVIEW_STATUS_COMPLETED
    }
}

/// Mean rating over ballots that carry one. Zero when no ballot does.
pub fn average_rating(ballots: &[ReviewBallot]) -> f64 {
    let ratings: Vec<i32> = ballots.iter().filter_map(|b| b.rating).collect();
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().sum::<i32>() as f64 / ratings.len() as f64
}

/// Decide the outcome of a review round.
///
/// Returns `None` while the round is incomplete: an empty set is never
/// complete, and any non-completed review keeps the round open. When
/// every review is completed, returns the resulting content status:
/// [`STATUS_APPROVED`] iff the mean rating meets the policy threshold,
/// [`STATUS_REJECTED`] otherwise.
pub fn evaluate_round(ballots: &[ReviewBallot], policy: &ReviewPolicy) -> Option<&'static str> {
    if ballots.is_empty() || !ballots.iter().all(ReviewBallot::is_completed) {
        return None;
    }
    if average_rating(ballots) >= policy.approval_threshold {
        Some(STATUS_APPROVED)
    } else {
        Some(STATUS_REJECTED)
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(reviewer_id: DbId, rating: Option<i32>) -> ReviewBallot {
        ReviewBallot {
            reviewer_id,
            status: REVIEW_STATUS_COMPLETED.to_string(),
            rating,
        }
    }

    fn pending(reviewer_id: DbId) -> ReviewBallot {
        ReviewBallot {
            reviewer_id,
            status: REVIEW_STATUS_PENDING.to_string(),
            rating: None,
        }
    }

    #[test]
    fn empty_round_is_never_complete() {
        assert_eq!(evaluate_round(&[], &ReviewPolicy::default()), None);
    }

    #[test]
    fn partial_completion_yields_no_verdict() {
        let ballots = vec![completed(1, Some(4)), pending(2)];
        assert_eq!(evaluate_round(&ballots, &ReviewPolicy::default()), None);
    }

    #[test]
    fn mean_at_threshold_approves() {
        // Ratings 4 and 2: mean exactly 3.0.
        let ballots = vec![completed(1, Some(4)), completed(2, Some(2))];
        assert_eq!(
            evaluate_round(&ballots, &ReviewPolicy::default()),
            Some(STATUS_APPROVED)
        );
    }

    #[test]
    fn mean_below_threshold_rejects() {
        // Ratings 4 and 1: mean 2.5.
        let ballots = vec![completed(1, Some(4)), completed(2, Some(1))];
        assert_eq!(
            evaluate_round(&ballots, &ReviewPolicy::default()),
            Some(STATUS_REJECTED)
        );
    }

    #[test]
    fn completed_round_with_no_ratings_rejects() {
        // No ratings at all: the average is treated as 0.
        let ballots = vec![completed(1, None), completed(2, None)];
        assert_eq!(average_rating(&ballots), 0.0);
        assert_eq!(
            evaluate_round(&ballots, &ReviewPolicy::default()),
            Some(STATUS_REJECTED)
        );
    }

    #[test]
    fn unrated_completed_reviews_excluded_from_mean() {
        let ballots = vec![completed(1, Some(5)), completed(2, None)];
        assert_eq!(average_rating(&ballots), 5.0);
        assert_eq!(
            evaluate_round(&ballots, &ReviewPolicy::default()),
            Some(STATUS_APPROVED)
        );
    }

    #[test]
    fn threshold_is_configurable() {
        let strict = ReviewPolicy {
            approval_threshold: 4.5,
        };
        let ballots = vec![completed(1, Some(4)), completed(2, Some(4))];
        assert_eq!(evaluate_round(&ballots, &strict), Some(STATUS_REJECTED));

        let lenient = ReviewPolicy {
            approval_threshold: 1.0,
        };
        assert_eq!(evaluate_round(&ballots, &lenient), Some(STATUS_APPROVED));
    }

    #[test]
    fn single_reviewer_round() {
        let ballots = vec![completed(1, Some(3))];
        assert_eq!(
            evaluate_round(&ballots, &ReviewPolicy::default()),
            Some(STATUS_APPROVED)
        );
    }

    #[test]
    fn rating_bounds_enforced() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn sub_score_bounds_enforced() {
        assert!(validate_sub_score("grammar_score", -1).is_err());
        assert!(validate_sub_score("grammar_score", 0).is_ok());
        assert!(validate_sub_score("grammar_score", 100).is_ok());
        assert!(validate_sub_score("grammar_score", 101).is_err());
    }

    #[test]
    fn feedback_length_enforced() {
        assert!(validate_feedback("looks good").is_ok());
        assert!(validate_feedback(&"x".repeat(MAX_FEEDBACK_LENGTH + 1)).is_err());
    }
}
