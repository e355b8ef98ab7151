//! Content review workflow engine.
//!
//! Owns the per-content atomic units: every mutating operation opens a
//! transaction, takes the content row lock, applies its guard checks and
//! writes, and commits before any event is published. Concurrent
//! operations on the same content item therefore serialize at the row
//! lock and observe each other's committed state.

use std::sync::Arc;

use inkpress_core::content::{
    self, ensure_deletable, ensure_editable, ensure_review_assignable, ensure_submittable,
    text_stats, STATUS_SUBMITTED, STATUS_UNDER_REVIEW,
};
use inkpress_core::error::CoreError;
use inkpress_core::notifications::{
    EVENT_CONTENT_APPROVED, EVENT_CONTENT_REJECTED, EVENT_CONTENT_SUBMITTED,
    EVENT_CONTENT_UPDATED, EVENT_REVIEW_ASSIGNED, EVENT_REVIEW_COMPLETED,
};
use inkpress_core::review::{
    self, average_rating, evaluate_round, ReviewBallot, ReviewPolicy, REVIEW_STATUS_COMPLETED,
};
use inkpress_core::roles;
use inkpress_core::types::DbId;
use inkpress_db::models::content::{Content, CreateContent, UpdateContentFields};
use inkpress_db::models::review::{AssignReview, Review, ReviewScores};
use inkpress_db::repositories::{ContentRepo, ContentVersionRepo, ReviewRepo, UserRepo};
use inkpress_db::DbPool;
use inkpress_events::{EventBus, Scope, WorkflowEvent};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};

/// Drives content through its editorial lifecycle:
/// `draft -> submitted -> under_review -> approved | rejected -> published`.
pub struct ContentWorkflow {
    pool: DbPool,
    policy: ReviewPolicy,
    event_bus: Arc<EventBus>,
}

impl ContentWorkflow {
    pub fn new(pool: DbPool, policy: ReviewPolicy, event_bus: Arc<EventBus>) -> Self {
        Self {
            pool,
            policy,
            event_bus,
        }
    }

    /// Create new content in `draft` status with its first version snapshot.
    pub async fn create(&self, actor: &AuthUser, input: CreateContent) -> AppResult<Content> {
        content::validate_title(&input.title)?;
        content::validate_body(&input.body)?;

        let stats = text_stats(&input.body);

        let mut tx = self.pool.begin().await?;
        let created = ContentRepo::insert(&mut tx, actor.user_id, &input, &stats).await?;
        ContentVersionRepo::insert(
            &mut tx,
            created.id,
            1,
            &created.title,
            &created.body,
            actor.user_id,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(content_id = created.id, author_id = actor.user_id, "Content created");
        Ok(created)
    }

    /// Apply a partial update to content.
    ///
    /// A body change recomputes the derived text statistics and appends a
    /// new version snapshot in the same transaction.
    pub async fn update(
        &self,
        actor: &AuthUser,
        content_id: DbId,
        fields: UpdateContentFields,
    ) -> AppResult<Content> {
        if fields.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "No fields to update".into(),
            )));
        }
        if let Some(title) = &fields.title {
            content::validate_title(title)?;
        }
        if let Some(body) = &fields.body {
            content::validate_body(body)?;
        }

        let mut tx = self.pool.begin().await?;
        let existing = ContentRepo::lock(&mut tx, content_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Content",
                id: content_id,
            })?;
        ensure_editable(
            &existing.status,
            existing.author_id,
            actor.user_id,
            &actor.role,
        )?;

        let stats = fields.body.as_deref().map(text_stats);
        let updated = ContentRepo::update_fields(
            &mut tx,
            content_id,
            fields.title.as_deref(),
            fields.body.as_deref(),
            fields.category.as_deref(),
            stats.as_ref(),
        )
        .await?;

        if fields.body.is_some() {
            let version = ContentVersionRepo::next_version_number(&mut tx, content_id).await?;
            ContentVersionRepo::insert(
                &mut tx,
                content_id,
                version,
                &updated.title,
                &updated.body,
                actor.user_id,
            )
            .await?;
        }
        tx.commit().await?;

        self.event_bus.publish(
            WorkflowEvent::new(EVENT_CONTENT_UPDATED, Scope::Content(content_id))
                .with_actor(actor.user_id)
                .with_payload(serde_json::json!({
                    "content_id": content_id,
                    "version_count": updated.version_count,
                })),
        );

        Ok(updated)
    }

    /// Submit draft content for review.
    pub async fn submit(&self, actor: &AuthUser, content_id: DbId) -> AppResult<Content> {
        let mut tx = self.pool.begin().await?;
        let existing = ContentRepo::lock(&mut tx, content_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Content",
                id: content_id,
            })?;
        ensure_submittable(&existing.status, existing.author_id, actor.user_id)?;

        let submitted = ContentRepo::set_status(&mut tx, content_id, STATUS_SUBMITTED).await?;
        tx.commit().await?;

        let scope = match submitted.organization_id {
            Some(org_id) => Scope::Organization(org_id),
            None => Scope::Content(content_id),
        };
        self.event_bus.publish(
            WorkflowEvent::new(EVENT_CONTENT_SUBMITTED, scope)
                .with_actor(actor.user_id)
                .with_payload(serde_json::json!({
                    "content_id": content_id,
                    "title": submitted.title,
                    "author_id": submitted.author_id,
                })),
        );

        tracing::info!(content_id, "Content submitted for review");
        Ok(submitted)
    }

    /// Assign a reviewer to submitted content.
    ///
    /// The first assignment moves the content from `submitted` to
    /// `under_review`; further reviewers may be added while the round is
    /// still open.
    pub async fn assign_review(&self, actor: &AuthUser, input: AssignReview) -> AppResult<Review> {
        if !roles::can_assign_reviews(&actor.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Only editors and administrators may assign reviews".into(),
            )));
        }

        let reviewer = UserRepo::find_by_id(&self.pool, input.reviewer_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: input.reviewer_id,
            })?;
        if !reviewer.is_active {
            return Err(AppError::Core(CoreError::Validation(
                "Reviewer account is inactive".into(),
            )));
        }

        let mut tx = self.pool.begin().await?;
        let existing = ContentRepo::lock(&mut tx, input.content_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Content",
                id: input.content_id,
            })?;
        ensure_review_assignable(&existing.status)?;
        if existing.author_id == input.reviewer_id {
            return Err(AppError::Core(CoreError::Validation(
                "Authors cannot review their own content".into(),
            )));
        }

        let duplicate =
            ReviewRepo::find_by_content_and_reviewer(&mut tx, input.content_id, input.reviewer_id)
                .await?;
        if duplicate.is_some() {
            return Err(AppError::Core(CoreError::Conflict(
                "This reviewer is already assigned to this content".into(),
            )));
        }

        let created = ReviewRepo::insert(&mut tx, input.content_id, input.reviewer_id).await?;
        if existing.status == STATUS_SUBMITTED {
            ContentRepo::set_status(&mut tx, input.content_id, STATUS_UNDER_REVIEW).await?;
        }
        tx.commit().await?;

        self.event_bus.publish(
            WorkflowEvent::new(EVENT_REVIEW_ASSIGNED, Scope::Content(input.content_id))
                .with_actor(actor.user_id)
                .with_payload(serde_json::json!({
                    "review_id": created.id,
                    "content_id": input.content_id,
                    "reviewer_id": input.reviewer_id,
                    "author_id": existing.author_id,
                })),
        );

        tracing::info!(
            review_id = created.id,
            content_id = input.content_id,
            reviewer_id = input.reviewer_id,
            "Review assigned"
        );
        Ok(created)
    }

    /// Complete a review with scores and feedback, then aggregate the
    /// review round.
    ///
    /// The scores write, the aggregate read, and any resulting status
    /// transition share one transaction under the content row lock, so
    /// two reviewers finishing simultaneously produce exactly one
    /// outcome transition.
    pub async fn complete_review(
        &self,
        actor: &AuthUser,
        review_id: DbId,
        scores: ReviewScores,
    ) -> AppResult<(Review, Content)> {
        let rating = scores.rating.ok_or_else(|| {
            CoreError::Validation("A rating is required to complete a review".into())
        })?;
        review::validate_rating(rating)?;
        if let Some(score) = scores.grammar_score {
            review::validate_sub_score("grammar_score", score)?;
        }
        if let Some(score) = scores.creativity_score {
            review::validate_sub_score("creativity_score", score)?;
        }
        if let Some(score) = scores.relevance_score {
            review::validate_sub_score("relevance_score", score)?;
        }
        if let Some(feedback) = &scores.feedback {
            review::validate_feedback(feedback)?;
        }

        let review = ReviewRepo::find_by_id(&self.pool, review_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Review",
                id: review_id,
            })?;
        if review.reviewer_id != actor.user_id && !roles::is_admin(&actor.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Only the assigned reviewer may complete this review".into(),
            )));
        }

        let mut tx = self.pool.begin().await?;
        let existing = ContentRepo::lock(&mut tx, review.content_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Content",
                id: review.content_id,
            })?;
        if existing.status != STATUS_UNDER_REVIEW {
            return Err(AppError::Core(CoreError::invalid_state(
                "complete a review",
                &existing.status,
            )));
        }

        // Re-read the review under the lock: a concurrent completion of
        // the same review serializes here, and only an administrator may
        // overwrite a completed one.
        let current = ReviewRepo::find_by_id_in_tx(&mut tx, review_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Review",
                id: review_id,
            })?;
        if current.status == REVIEW_STATUS_COMPLETED && !roles::is_admin(&actor.role) {
            return Err(AppError::Core(CoreError::invalid_state(
                "complete a review",
                &current.status,
            )));
        }

        let completed = ReviewRepo::complete(&mut tx, review_id, &scores).await?;

        // Aggregate the round under the same lock.
        let round = ReviewRepo::list_by_content_in_tx(&mut tx, review.content_id).await?;
        let ballots: Vec<ReviewBallot> = round
            .iter()
            .map(|r| ReviewBallot {
                reviewer_id: r.reviewer_id,
                status: r.status.clone(),
                rating: r.rating,
            })
            .collect();

        let outcome = evaluate_round(&ballots, &self.policy);
        let content = match outcome {
            Some(status) => ContentRepo::set_status(&mut tx, review.content_id, status).await?,
            None => existing,
        };
        tx.commit().await?;

        self.event_bus.publish(
            WorkflowEvent::new(EVENT_REVIEW_COMPLETED, Scope::Content(review.content_id))
                .with_actor(actor.user_id)
                .with_payload(serde_json::json!({
                    "review_id": review_id,
                    "content_id": review.content_id,
                    "reviewer_id": review.reviewer_id,
                    "author_id": content.author_id,
                    "rating": rating,
                })),
        );

        if let Some(status) = outcome {
            let event_type = if status == content::STATUS_APPROVED {
                EVENT_CONTENT_APPROVED
            } else {
                EVENT_CONTENT_REJECTED
            };
            let completed_ballots: Vec<ReviewBallot> = ballots
                .into_iter()
                .filter(|b| b.status == REVIEW_STATUS_COMPLETED)
                .collect();
            self.event_bus.publish(
                WorkflowEvent::new(event_type, Scope::Content(review.content_id))
                    .with_actor(actor.user_id)
                    .with_payload(serde_json::json!({
                        "content_id": review.content_id,
                        "author_id": content.author_id,
                        "average_rating": average_rating(&completed_ballots),
                    })),
            );
            tracing::info!(
                content_id = review.content_id,
                status,
                "Review round complete"
            );
        }

        Ok((completed, content))
    }

    /// Delete content regardless of status.
    ///
    /// Authors may delete their own work; administrators may delete
    /// anything. Versions and reviews cascade.
    pub async fn delete(&self, actor: &AuthUser, content_id: DbId) -> AppResult<()> {
        let existing = ContentRepo::find_by_id(&self.pool, content_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Content",
                id: content_id,
            })?;

        ensure_deletable(existing.author_id, actor.user_id, &actor.role)?;

        ContentRepo::delete(&self.pool, content_id).await?;
        tracing::info!(content_id, "Content deleted");
        Ok(())
    }
}
