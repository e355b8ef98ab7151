//! Magazine status constants and issue validation.

use crate::error::CoreError;

pub const MAGAZINE_STATUS_DRAFT: &str = "draft";
pub const MAGAZINE_STATUS_PUBLISHED: &str = "published";

/// All valid magazine status values.
pub const VALID_MAGAZINE_STATUSES: &[&str] =
    &[MAGAZINE_STATUS_DRAFT, MAGAZINE_STATUS_PUBLISHED];

pub const MIN_MAGAZINE_TITLE_LENGTH: usize = 2;
pub const MAX_MAGAZINE_TITLE_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 1_000;

/// Validate a magazine title.
pub fn validate_magazine_title(title: &str) -> Result<(), CoreError> {
    let len = title.trim().chars().count();
    if len < MIN_MAGAZINE_TITLE_LENGTH || len > MAX_MAGAZINE_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Magazine title must be between {MIN_MAGAZINE_TITLE_LENGTH} and {MAX_MAGAZINE_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate issue and volume numbers (both 1-based).
pub fn validate_issue_numbers(issue_number: i32, volume_number: i32) -> Result<(), CoreError> {
    if issue_number < 1 {
        return Err(CoreError::Validation(
            "Issue number must be at least 1".into(),
        ));
    }
    if volume_number < 1 {
        return Err(CoreError::Validation(
            "Volume number must be at least 1".into(),
        ));
    }
    Ok(())
}

/// Validate an optional magazine description.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_volume_must_be_positive() {
        assert!(validate_issue_numbers(1, 1).is_ok());
        assert!(validate_issue_numbers(0, 1).is_err());
        assert!(validate_issue_numbers(1, 0).is_err());
        assert!(validate_issue_numbers(-3, 2).is_err());
    }

    #[test]
    fn title_bounds_enforced() {
        assert!(validate_magazine_title("Spring Issue").is_ok());
        assert!(validate_magazine_title("x").is_err());
        assert!(validate_magazine_title(&"t".repeat(201)).is_err());
    }

    #[test]
    fn description_length_enforced() {
        assert!(validate_description("A quarterly anthology").is_ok());
        assert!(validate_description(&"d".repeat(1_001)).is_err());
    }
}
