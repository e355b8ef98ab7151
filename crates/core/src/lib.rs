//! Pure domain logic for the Inkpress review and publication workflow.
//!
//! No I/O lives here: status constants and legal transitions, the review
//! round aggregation rule, derived text statistics, role privileges, and
//! the shared error taxonomy. The `db` and `api` crates build on these.

pub mod content;
pub mod error;
pub mod magazine;
pub mod notifications;
pub mod review;
pub mod roles;
pub mod types;
