//! Magazine assembly and publication engine.
//!
//! An issue collects approved content in an explicit order, then
//! publication renders the assembled document, stores the artifact, and
//! flips the issue to `published` in a single UPDATE. A renderer or
//! storage failure therefore leaves the issue untouched and retryable.

use std::sync::Arc;

use inkpress_core::content::ensure_publishable_into_magazine;
use inkpress_core::error::CoreError;
use inkpress_core::magazine::{
    self, MAGAZINE_STATUS_DRAFT, MAGAZINE_STATUS_PUBLISHED,
};
use inkpress_core::notifications::EVENT_MAGAZINE_PUBLISHED;
use inkpress_core::roles;
use inkpress_core::types::DbId;
use inkpress_db::models::magazine::{CreateMagazine, Magazine, UpdateMagazineFields};
use inkpress_db::models::magazine_content::{AddMagazineContent, MagazineContent};
use inkpress_db::repositories::{ContentRepo, MagazineContentRepo, MagazineRepo};
use inkpress_db::DbPool;
use inkpress_events::{EventBus, Scope, WorkflowEvent};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::render::{ArtifactStore, MagazineRenderer};

/// Assembles magazine issues from approved content and publishes them.
pub struct MagazineAssembler {
    pool: DbPool,
    renderer: Arc<dyn MagazineRenderer>,
    store: Arc<dyn ArtifactStore>,
    event_bus: Arc<EventBus>,
}

impl MagazineAssembler {
    pub fn new(
        pool: DbPool,
        renderer: Arc<dyn MagazineRenderer>,
        store: Arc<dyn ArtifactStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            pool,
            renderer,
            store,
            event_bus,
        }
    }

    fn ensure_manager(actor: &AuthUser) -> AppResult<()> {
        if roles::can_manage_magazines(&actor.role) {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "Only editors and administrators may manage magazines".into(),
            )))
        }
    }

    /// Create a new magazine issue in `draft` status.
    ///
    /// `(organization, issue_number, volume_number)` must be unique; a
    /// duplicate surfaces as a 409 through the unique constraint.
    pub async fn create(&self, actor: &AuthUser, input: CreateMagazine) -> AppResult<Magazine> {
        Self::ensure_manager(actor)?;
        magazine::validate_magazine_title(&input.title)?;
        if let Some(description) = &input.description {
            magazine::validate_description(description)?;
        }
        magazine::validate_issue_numbers(input.issue_number, input.volume_number)?;

        let created = MagazineRepo::insert(&self.pool, actor.user_id, &input).await?;
        tracing::info!(magazine_id = created.id, "Magazine created");
        Ok(created)
    }

    /// Apply a partial update to a draft issue.
    pub async fn update(
        &self,
        actor: &AuthUser,
        magazine_id: DbId,
        fields: UpdateMagazineFields,
    ) -> AppResult<Magazine> {
        Self::ensure_manager(actor)?;
        if let Some(title) = &fields.title {
            magazine::validate_magazine_title(title)?;
        }
        if let Some(description) = &fields.description {
            magazine::validate_description(description)?;
        }

        let mut tx = self.pool.begin().await?;
        let existing = MagazineRepo::lock(&mut tx, magazine_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Magazine",
                id: magazine_id,
            })?;
        if existing.status == MAGAZINE_STATUS_PUBLISHED {
            return Err(AppError::Core(CoreError::invalid_state(
                "edit magazine",
                &existing.status,
            )));
        }

        let updated = MagazineRepo::update_fields(
            &mut tx,
            magazine_id,
            fields.title.as_deref(),
            fields.description.as_deref(),
            fields.publication_date,
        )
        .await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a draft issue. Published issues are immutable.
    pub async fn delete(&self, actor: &AuthUser, magazine_id: DbId) -> AppResult<()> {
        Self::ensure_manager(actor)?;

        let existing = MagazineRepo::find_by_id(&self.pool, magazine_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Magazine",
                id: magazine_id,
            })?;
        if existing.status == MAGAZINE_STATUS_PUBLISHED {
            return Err(AppError::Core(CoreError::invalid_state(
                "delete magazine",
                &existing.status,
            )));
        }

        MagazineRepo::delete(&self.pool, magazine_id).await?;
        tracing::info!(magazine_id, "Magazine deleted");
        Ok(())
    }

    /// Place an approved content item into a draft issue.
    ///
    /// The content's approval is checked at insertion time only; a later
    /// status change does not remove it from the issue.
    pub async fn add_content(
        &self,
        actor: &AuthUser,
        magazine_id: DbId,
        input: AddMagazineContent,
    ) -> AppResult<MagazineContent> {
        Self::ensure_manager(actor)?;
        if input.order_index < 0 {
            return Err(AppError::Core(CoreError::Validation(
                "order_index must not be negative".into(),
            )));
        }
        if input.page_number.is_some_and(|p| p < 1) {
            return Err(AppError::Core(CoreError::Validation(
                "page_number must be at least 1".into(),
            )));
        }

        let mut tx = self.pool.begin().await?;
        let issue = MagazineRepo::lock(&mut tx, magazine_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Magazine",
                id: magazine_id,
            })?;
        if issue.status != MAGAZINE_STATUS_DRAFT {
            return Err(AppError::Core(CoreError::invalid_state(
                "add content to a magazine",
                &issue.status,
            )));
        }

        let content = ContentRepo::lock(&mut tx, input.content_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Content",
                id: input.content_id,
            })?;
        ensure_publishable_into_magazine(&content.status)?;

        let placement = MagazineContentRepo::insert(
            &mut tx,
            magazine_id,
            input.content_id,
            input.order_index,
            input.page_number,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            magazine_id,
            content_id = input.content_id,
            "Content placed in magazine"
        );
        Ok(placement)
    }

    /// Remove a content placement from a draft issue.
    pub async fn remove_content(
        &self,
        actor: &AuthUser,
        magazine_id: DbId,
        content_id: DbId,
    ) -> AppResult<()> {
        Self::ensure_manager(actor)?;

        let mut tx = self.pool.begin().await?;
        let issue = MagazineRepo::lock(&mut tx, magazine_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Magazine",
                id: magazine_id,
            })?;
        if issue.status != MAGAZINE_STATUS_DRAFT {
            return Err(AppError::Core(CoreError::invalid_state(
                "remove content from a magazine",
                &issue.status,
            )));
        }

        let removed = MagazineContentRepo::remove(&mut tx, magazine_id, content_id).await?;
        if !removed {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "MagazineContent",
                id: content_id,
            }));
        }
        tx.commit().await?;
        Ok(())
    }

    /// Publish an issue: render its articles, store the PDF, and flip
    /// the issue to `published`.
    ///
    /// The issue row lock is held across the render so two concurrent
    /// publish calls serialize; the second observes `published` and
    /// fails the state check.
    pub async fn publish(&self, actor: &AuthUser, magazine_id: DbId) -> AppResult<Magazine> {
        Self::ensure_manager(actor)?;

        let mut tx = self.pool.begin().await?;
        let issue = MagazineRepo::lock(&mut tx, magazine_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Magazine",
                id: magazine_id,
            })?;
        if issue.status != MAGAZINE_STATUS_DRAFT {
            return Err(AppError::Core(CoreError::invalid_state(
                "publish magazine",
                &issue.status,
            )));
        }

        let articles = MagazineContentRepo::list_articles(&mut tx, magazine_id).await?;
        if articles.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Cannot publish a magazine with no content".into(),
            )));
        }

        // Render and store before any state changes; a failure here
        // aborts the transaction with the issue untouched.
        let pdf = self.renderer.render(&issue, &articles).await?;
        let file_name = format!(
            "magazine-{}-vol{}-issue{}.pdf",
            issue.id, issue.volume_number, issue.issue_number
        );
        let pdf_url = self.store.store_pdf(&file_name, &pdf).await?;

        let publication_date = issue
            .publication_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive());
        let published =
            MagazineRepo::set_published(&mut tx, magazine_id, &pdf_url, publication_date).await?;
        tx.commit().await?;

        let scope = match published.organization_id {
            Some(org_id) => Scope::Organization(org_id),
            None => Scope::User(published.created_by),
        };
        self.event_bus.publish(
            WorkflowEvent::new(EVENT_MAGAZINE_PUBLISHED, scope)
                .with_actor(actor.user_id)
                .with_payload(serde_json::json!({
                    "magazine_id": published.id,
                    "title": published.title,
                    "pdf_url": published.pdf_url,
                    "created_by": published.created_by,
                })),
        );

        tracing::info!(magazine_id, "Magazine published");
        Ok(published)
    }
}
