//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO with explicit optional fields for patches
//!   (unknown fields are rejected at the boundary; no dynamic field lists)

pub mod content;
pub mod content_version;
pub mod magazine;
pub mod magazine_content;
pub mod notification;
pub mod review;
pub mod user;
