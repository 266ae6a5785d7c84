//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod prompt_repo;
pub mod prompt_tag_repo;
pub mod prompt_version_repo;
pub mod tag_repo;

pub use category_repo::CategoryRepo;
pub use prompt_repo::PromptRepo;
pub use prompt_tag_repo::PromptTagRepo;
pub use prompt_version_repo::PromptVersionRepo;
pub use tag_repo::TagRepo;
