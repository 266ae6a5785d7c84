//! Prompt version models.
//!
//! Versions are immutable snapshots of a prompt's title, content and
//! description, taken just before a change to title or content.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use promptdir_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A prompt version row from the `prompt_versions` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PromptVersion {
    pub id: DbId,
    pub prompt_id: DbId,
    pub version_number: i32,
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for a new snapshot. The version number is assigned by the store.
#[derive(Debug, Clone)]
pub struct CreatePromptVersion {
    pub prompt_id: DbId,
    pub title: String,
    pub content: String,
    pub description: Option<String>,
}
