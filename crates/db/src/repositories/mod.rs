//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&DbPool` as the first argument. Operations that write more than
//! one row run inside a single transaction.

pub mod project_repo;
pub mod template_repo;

pub use project_repo::ProjectRepo;
pub use template_repo::{TemplateRepo, TemplateWrite};
