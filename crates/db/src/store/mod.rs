//! Repository traits over the prompt data model.
//!
//! The library layer only talks to storage through these traits, one per
//! entity, bundled as [`PromptStore`]. [`PgStore`] delegates to the SQL
//! repositories; [`MemoryStore`] keeps everything in process and is used by
//! tests and by servers started without a database.

use async_trait::async_trait;
use promptdir_core::types::DbId;

use crate::models::category::Category;
use crate::models::prompt::{CreatePrompt, Prompt, PromptQuery, UpdatePrompt};
use crate::models::prompt_version::{CreatePromptVersion, PromptVersion};
use crate::models::tag::{PromptTagRow, Tag};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors raised by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A unique constraint rejected the write. Carries the constraint name.
    #[error("Duplicate value violates unique constraint: {0}")]
    UniqueViolation(String),

    /// A foreign key rejected the write. Carries the constraint name.
    #[error("Referenced row does not exist: {0}")]
    ForeignKeyViolation(String),

    /// The backend could not serve the call.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Name of the unique constraint this error violated, if any.
    ///
    /// Covers both the in-memory store's own variant and PostgreSQL's
    /// SQLSTATE 23505.
    pub fn unique_violation(&self) -> Option<&str> {
        match self {
            StoreError::UniqueViolation(constraint) => Some(constraint),
            StoreError::Database(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some("23505") =>
            {
                Some(db_err.constraint().unwrap_or("unknown"))
            }
            _ => None,
        }
    }
}

/// Row-level access to `prompts`.
#[async_trait]
pub trait PromptRepository: Send + Sync {
    /// Select prompts matching `query`, most recently updated first.
    async fn select_prompts(&self, query: &PromptQuery) -> StoreResult<Vec<Prompt>>;

    async fn find_prompt(&self, id: DbId) -> StoreResult<Option<Prompt>>;

    /// Insert a prompt row; `input.tag_ids` is ignored.
    async fn insert_prompt(&self, input: &CreatePrompt) -> StoreResult<Prompt>;

    /// Apply the provided columns of `input`; `input.tag_ids` is ignored.
    async fn update_prompt(&self, id: DbId, input: &UpdatePrompt) -> StoreResult<Option<Prompt>>;

    async fn delete_prompt(&self, id: DbId) -> StoreResult<bool>;
}

/// Read access to `categories`.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    /// Batch lookup; unknown IDs are skipped.
    async fn categories_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<Category>>;
}

/// Access to `tags` and the `prompt_tags` links.
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn list_tags(&self) -> StoreResult<Vec<Tag>>;

    async fn insert_tag(&self, name: &str, slug: &str) -> StoreResult<Tag>;

    /// Distinct IDs of prompts linked to ANY of `tag_ids`.
    async fn prompt_ids_for_tags(&self, tag_ids: &[DbId]) -> StoreResult<Vec<DbId>>;

    /// Tags of all the given prompts in one batch, ordered by tag name.
    async fn tags_for_prompts(&self, prompt_ids: &[DbId]) -> StoreResult<Vec<PromptTagRow>>;

    async fn insert_prompt_tags(&self, prompt_id: DbId, tag_ids: &[DbId]) -> StoreResult<()>;

    /// Remove all links of a prompt, returning how many were removed.
    async fn delete_prompt_tags(&self, prompt_id: DbId) -> StoreResult<u64>;
}

/// Append-only access to `prompt_versions`.
#[async_trait]
pub trait VersionRepository: Send + Sync {
    /// Insert a snapshot numbered one past the prompt's existing versions.
    /// Numbering and insertion happen atomically.
    async fn insert_version(&self, input: &CreatePromptVersion) -> StoreResult<PromptVersion>;

    /// All versions of a prompt, newest first.
    async fn list_versions(&self, prompt_id: DbId) -> StoreResult<Vec<PromptVersion>>;

    async fn count_versions(&self, prompt_id: DbId) -> StoreResult<i64>;
}

/// Everything the prompt library needs from a backend.
#[async_trait]
pub trait PromptStore:
    PromptRepository + CategoryRepository + TagRepository + VersionRepository
{
    /// Liveness check.
    async fn health_check(&self) -> StoreResult<()>;
}
