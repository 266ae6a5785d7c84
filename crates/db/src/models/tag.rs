//! Tag and prompt-tag link models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use promptdir_core::types::{DbId, Timestamp};

/// A row from the `tags` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
}

/// A tag joined through `prompt_tags`, tagged with the prompt it belongs to.
///
/// Returned by the batched link lookup used during hydration.
#[derive(Debug, Clone, FromRow)]
pub struct PromptTagRow {
    pub prompt_id: DbId,
    #[sqlx(flatten)]
    pub tag: Tag,
}

/// DTO for creating a tag. The slug is derived from `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTag {
    pub name: String,
}
