//! Well-known role name constants and privilege checks.
//!
//! Role names must match the seed data in the `create_users_table`
//! migration. The workflow trusts the role supplied by the identity
//! provider and never re-verifies credentials.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_AUTHOR: &str = "author";
pub const ROLE_REVIEWER: &str = "reviewer";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR, ROLE_AUTHOR, ROLE_REVIEWER];

/// Whether the role carries full administrative override.
pub fn is_admin(role: &str) -> bool {
    role == ROLE_ADMIN
}

/// Whether the role may assign reviewers to submitted content.
pub fn can_assign_reviews(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_EDITOR
}

/// Whether the role may create and manage magazine issues.
pub fn can_manage_magazines(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_EDITOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_has_every_privilege() {
        assert!(is_admin(ROLE_ADMIN));
        assert!(can_assign_reviews(ROLE_ADMIN));
        assert!(can_manage_magazines(ROLE_ADMIN));
    }

    #[test]
    fn editor_assigns_reviews_but_is_not_admin() {
        assert!(!is_admin(ROLE_EDITOR));
        assert!(can_assign_reviews(ROLE_EDITOR));
        assert!(can_manage_magazines(ROLE_EDITOR));
    }

    #[test]
    fn authors_and_reviewers_have_no_staff_privileges() {
        for role in [ROLE_AUTHOR, ROLE_REVIEWER] {
            assert!(!is_admin(role));
            assert!(!can_assign_reviews(role));
            assert!(!can_manage_magazines(role));
        }
    }
}
