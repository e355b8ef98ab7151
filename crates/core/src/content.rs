//! Content status machine, editing guards, and derived text statistics.
//!
//! The status constants and the transition table are the single source of
//! truth for the content lifecycle; the workflow engine and the DB layer
//! both consult them.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::roles;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Status constants
-------------------------------------------------------------------------- */

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_SUBMITTED: &str = "submitted";
pub const STATUS_UNDER_REVIEW: &str = "under_review";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";
pub const STATUS_PUBLISHED: &str = "published";

/// All valid content status values.
pub const VALID_CONTENT_STATUSES: &[&str] = &[
    STATUS_DRAFT,
    STATUS_SUBMITTED,
    STATUS_UNDER_REVIEW,
    STATUS_APPROVED,
    STATUS_REJECTED,
    STATUS_PUBLISHED,
];

/// Legal status transitions.
///
/// `approved` and `rejected` are not strictly terminal: an administrator
/// may force further edits, but no transition out of them happens through
/// the ordinary workflow except `approved -> published`.
pub fn can_transition(from: &str, to: &str) -> bool {
    matches!(
        (from, to),
        (STATUS_DRAFT, STATUS_SUBMITTED)
            | (STATUS_SUBMITTED, STATUS_UNDER_REVIEW)
            | (STATUS_UNDER_REVIEW, STATUS_APPROVED)
            | (STATUS_UNDER_REVIEW, STATUS_REJECTED)
            | (STATUS_APPROVED, STATUS_PUBLISHED)
    )
}

/* --------------------------------------------------------------------------
Validation limits (mirroring the store-side constraints)
-------------------------------------------------------------------------- */

/// Minimum body length accepted at creation and on body updates.
pub const MIN_BODY_LENGTH: usize = 10;

/// Title length bounds.
pub const MIN_TITLE_LENGTH: usize = 2;
pub const MAX_TITLE_LENGTH: usize = 500;

/// Validate a content title.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let len = title.trim().chars().count();
    if len < MIN_TITLE_LENGTH || len > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must be between {MIN_TITLE_LENGTH} and {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a content body.
pub fn validate_body(body: &str) -> Result<(), CoreError> {
    if body.chars().count() < MIN_BODY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Body must be at least {MIN_BODY_LENGTH} characters"
        )));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Workflow guards
-------------------------------------------------------------------------- */

/// Whether `actor_id` with `role` may edit content owned by `author_id`
/// in the given status.
///
/// Authors and admins may edit; once content leaves `draft` only an
/// admin may mutate it, and published content is admin-only regardless.
pub fn ensure_editable(
    status: &str,
    author_id: DbId,
    actor_id: DbId,
    role: &str,
) -> Result<(), CoreError> {
    if actor_id != author_id && !roles::is_admin(role) {
        return Err(CoreError::Forbidden(
            "Only the author or an administrator may modify this content".into(),
        ));
    }
    if status != STATUS_DRAFT && !roles::is_admin(role) {
        return Err(CoreError::invalid_state("edit content", status));
    }
    Ok(())
}

/// Whether the content may be submitted for review by `actor_id`.
///
/// Only the author may submit, and only from `draft`.
pub fn ensure_submittable(
    status: &str,
    author_id: DbId,
    actor_id: DbId,
) -> Result<(), CoreError> {
    if actor_id != author_id {
        return Err(CoreError::Forbidden(
            "Only the author may submit content for review".into(),
        ));
    }
    if status != STATUS_DRAFT {
        return Err(CoreError::invalid_state("submit content", status));
    }
    Ok(())
}

/// Whether `actor_id` with `role` may delete content owned by `author_id`.
///
/// Deletion is permission-gated only: the author may remove their own
/// work at any status, and an administrator may remove anything.
pub fn ensure_deletable(author_id: DbId, actor_id: DbId, role: &str) -> Result<(), CoreError> {
    if actor_id == author_id || roles::is_admin(role) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the author or an administrator may delete this content".into(),
        ))
    }
}

/// Whether a review may be assigned while the content is in `status`.
///
/// Reviews are created only for `submitted` or `under_review` content;
/// the first assignment moves `submitted` to `under_review`.
pub fn ensure_review_assignable(status: &str) -> Result<(), CoreError> {
    if status == STATUS_SUBMITTED || status == STATUS_UNDER_REVIEW {
        Ok(())
    } else {
        Err(CoreError::invalid_state("assign a review", status))
    }
}

/// Whether the content may be added to a magazine.
///
/// Approval is a snapshot at insertion time; it is not re-checked later.
pub fn ensure_publishable_into_magazine(status: &str) -> Result<(), CoreError> {
    if status == STATUS_APPROVED {
        Ok(())
    } else {
        Err(CoreError::invalid_state("add content to a magazine", status))
    }
}

/* --------------------------------------------------------------------------
Version numbering
-------------------------------------------------------------------------- */

/// Next sequential version number given the current maximum, if any.
///
/// Version numbers are a gapless 1-based sequence per content item; the
/// caller must hold the content row lock so two writers cannot read the
/// same maximum.
pub fn next_version_number(current_max: Option<i32>) -> i32 {
    current_max.unwrap_or(0) + 1
}

/* --------------------------------------------------------------------------
Derived text statistics
-------------------------------------------------------------------------- */

/// Average adult reading speed used for the reading-time estimate.
const WORDS_PER_MINUTE: usize = 200;

/// Maximum excerpt length in characters, not counting the ellipsis.
pub const EXCERPT_MAX_LENGTH: usize = 160;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Word count, reading time, and excerpt derived from a content body.
///
/// Recomputed whenever the body changes; never stored authoritatively
/// anywhere but the content row.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStats {
    pub word_count: i32,
    pub reading_time: i32,
    pub excerpt: String,
    pub language: &'static str,
}

/// Compute the derived fields for a body.
pub fn text_stats(body: &str) -> TextStats {
    let word_count = body.split_whitespace().count();
    TextStats {
        word_count: word_count as i32,
        reading_time: reading_time_minutes(word_count),
        excerpt: generate_excerpt(body),
        language: detect_language(body),
    }
}

/// Estimated reading time in whole minutes, rounded up.
fn reading_time_minutes(word_count: usize) -> i32 {
    word_count.div_ceil(WORDS_PER_MINUTE) as i32
}

/// Plain-text excerpt: markup stripped, truncated to
/// [`EXCERPT_MAX_LENGTH`] characters with a trailing ellipsis.
pub fn generate_excerpt(body: &str) -> String {
    let plain = TAG_RE.replace_all(body, "");
    let plain = plain.trim();
    if plain.chars().count() <= EXCERPT_MAX_LENGTH {
        return plain.to_string();
    }
    let truncated: String = plain.chars().take(EXCERPT_MAX_LENGTH).collect();
    format!("{}...", truncated.trim_end())
}

pub const LANGUAGE_HINDI: &str = "hindi";
pub const LANGUAGE_ENGLISH: &str = "english";
pub const LANGUAGE_MIXED: &str = "mixed";

/// Detect the body's language from its script.
///
/// Devanagari characters mark Hindi; Latin characters mark English; both
/// together mark mixed. Defaults to English for bodies with neither.
pub fn detect_language(body: &str) -> &'static str {
    let has_hindi = body.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c));
    let has_english = body.chars().any(|c| c.is_ascii_alphabetic());
    match (has_hindi, has_english) {
        (true, true) => LANGUAGE_MIXED,
        (true, false) => LANGUAGE_HINDI,
        _ => LANGUAGE_ENGLISH,
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_transitions_accepted() {
        assert!(can_transition(STATUS_DRAFT, STATUS_SUBMITTED));
        assert!(can_transition(STATUS_SUBMITTED, STATUS_UNDER_REVIEW));
        assert!(can_transition(STATUS_UNDER_REVIEW, STATUS_APPROVED));
        assert!(can_transition(STATUS_UNDER_REVIEW, STATUS_REJECTED));
        assert!(can_transition(STATUS_APPROVED, STATUS_PUBLISHED));
    }

    #[test]
    fn illegal_transitions_rejected() {
        assert!(!can_transition(STATUS_DRAFT, STATUS_UNDER_REVIEW));
        assert!(!can_transition(STATUS_DRAFT, STATUS_APPROVED));
        assert!(!can_transition(STATUS_SUBMITTED, STATUS_APPROVED));
        assert!(!can_transition(STATUS_REJECTED, STATUS_PUBLISHED));
        assert!(!can_transition(STATUS_PUBLISHED, STATUS_DRAFT));
        assert!(!can_transition(STATUS_APPROVED, STATUS_DRAFT));
    }

    #[test]
    fn submit_requires_draft_status() {
        assert!(ensure_submittable(STATUS_DRAFT, 1, 1).is_ok());

        for status in [
            STATUS_SUBMITTED,
            STATUS_UNDER_REVIEW,
            STATUS_APPROVED,
            STATUS_REJECTED,
            STATUS_PUBLISHED,
        ] {
            let err = ensure_submittable(status, 1, 1).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidState(_)),
                "expected InvalidState for {status}"
            );
            assert!(err.to_string().contains(status));
        }
    }

    #[test]
    fn submit_requires_author() {
        let err = ensure_submittable(STATUS_DRAFT, 1, 2).unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
    }

    #[test]
    fn author_edits_draft_but_not_submitted() {
        assert!(ensure_editable(STATUS_DRAFT, 1, 1, crate::roles::ROLE_AUTHOR).is_ok());
        let err = ensure_editable(STATUS_SUBMITTED, 1, 1, crate::roles::ROLE_AUTHOR).unwrap_err();
        assert!(matches!(err, CoreError::InvalidState(_)));
    }

    #[test]
    fn admin_edits_published_content() {
        assert!(ensure_editable(STATUS_PUBLISHED, 1, 99, crate::roles::ROLE_ADMIN).is_ok());
    }

    #[test]
    fn non_owner_cannot_edit() {
        let err = ensure_editable(STATUS_DRAFT, 1, 2, crate::roles::ROLE_AUTHOR).unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
    }

    #[test]
    fn author_deletes_own_content() {
        assert!(ensure_deletable(1, 1, crate::roles::ROLE_AUTHOR).is_ok());
    }

    #[test]
    fn admin_deletes_any_content() {
        assert!(ensure_deletable(1, 99, crate::roles::ROLE_ADMIN).is_ok());
    }

    #[test]
    fn non_owner_cannot_delete() {
        let err = ensure_deletable(1, 2, crate::roles::ROLE_EDITOR).unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
    }

    #[test]
    fn review_assignment_legal_in_submitted_and_under_review() {
        assert!(ensure_review_assignable(STATUS_SUBMITTED).is_ok());
        assert!(ensure_review_assignable(STATUS_UNDER_REVIEW).is_ok());
        assert!(ensure_review_assignable(STATUS_DRAFT).is_err());
        assert!(ensure_review_assignable(STATUS_APPROVED).is_err());
    }

    #[test]
    fn magazine_inclusion_requires_approved() {
        assert!(ensure_publishable_into_magazine(STATUS_APPROVED).is_ok());
        for status in [
            STATUS_DRAFT,
            STATUS_SUBMITTED,
            STATUS_UNDER_REVIEW,
            STATUS_REJECTED,
        ] {
            let err = ensure_publishable_into_magazine(status).unwrap_err();
            assert!(matches!(err, CoreError::InvalidState(_)));
        }
    }

    #[test]
    fn version_numbering_starts_at_one() {
        assert_eq!(next_version_number(None), 1);
    }

    #[test]
    fn version_numbering_is_gapless() {
        // Repeated allocation from the previous maximum yields 1..=N
        // with no gaps or duplicates.
        let mut max = None;
        let allocated: Vec<i32> = (0..5)
            .map(|_| {
                let next = next_version_number(max);
                max = Some(next);
                next
            })
            .collect();
        assert_eq!(allocated, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn word_count_splits_on_whitespace() {
        let stats = text_stats("one two   three\nfour");
        assert_eq!(stats.word_count, 4);
    }

    #[test]
    fn reading_time_rounds_up() {
        let body = vec!["word"; 201].join(" ");
        let stats = text_stats(&body);
        assert_eq!(stats.reading_time, 2);

        let body = vec!["word"; 200].join(" ");
        assert_eq!(text_stats(&body).reading_time, 1);
    }

    #[test]
    fn excerpt_strips_markup_and_truncates() {
        let short = generate_excerpt("<p>Hello <b>world</b></p>");
        assert_eq!(short, "Hello world");

        let long_body = "x".repeat(400);
        let excerpt = generate_excerpt(&long_body);
        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt.chars().count(), EXCERPT_MAX_LENGTH + 3);
    }

    #[test]
    fn language_detection_covers_scripts() {
        assert_eq!(detect_language("hello world"), LANGUAGE_ENGLISH);
        assert_eq!(detect_language("नमस्ते दुनिया"), LANGUAGE_HINDI);
        assert_eq!(detect_language("hello दुनिया"), LANGUAGE_MIXED);
        assert_eq!(detect_language("12345"), LANGUAGE_ENGLISH);
    }

    #[test]
    fn body_below_minimum_rejected() {
        assert!(validate_body("too short").is_err());
        assert!(validate_body("long enough body").is_ok());
    }

    #[test]
    fn title_bounds_enforced() {
        assert!(validate_title("x").is_err());
        assert!(validate_title("A fine title").is_ok());
        assert!(validate_title(&"t".repeat(501)).is_err());
    }
}
