//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod annotation_repo;
pub mod user_repo;

pub use annotation_repo::AnnotationRepo;
pub use user_repo::UserRepo;
