//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Simple reads take `&PgPool`; methods that must participate in a
//! caller-owned transaction (the per-content atomic units) take
//! `&mut PgConnection` instead.

pub mod content_repo;
pub mod content_version_repo;
pub mod magazine_content_repo;
pub mod magazine_repo;
pub mod notification_repo;
pub mod review_repo;
pub mod user_repo;

pub use content_repo::ContentRepo;
pub use content_version_repo::ContentVersionRepo;
pub use magazine_content_repo::MagazineContentRepo;
pub use magazine_repo::MagazineRepo;
pub use notification_repo::NotificationRepo;
pub use review_repo::ReviewRepo;
pub use user_repo::UserRepo;
