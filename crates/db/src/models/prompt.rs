//! Prompt models and DTOs.
//!
//! Defines the database row struct for `prompts`, its hydrated form, the
//! create/update inputs and the filter types used by the query composer.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use promptdir_core::types::{DbId, Timestamp};

use super::category::Category;
use super::tag::Tag;

/// Default value of the reserved `visibility` column.
pub const VISIBILITY_PERSONAL: &str = "personal";

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `prompts` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Prompt {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub is_favorite: bool,
    /// Reserved; never read or written by any operation.
    pub owner_id: Option<DbId>,
    /// Reserved; one of `personal`, `team`, `public`.
    pub visibility: String,
    /// Reserved; never read or written by any operation.
    pub team_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A prompt with its category and tags resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptWithRelations {
    #[serde(flatten)]
    pub prompt: Prompt,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a prompt together with its initial tag links.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePrompt {
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub is_favorite: Option<bool>,
    pub tag_ids: Option<Vec<DbId>>,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Partial update of a prompt.
///
/// Omitted fields are left untouched. `description` and `category_id` are
/// tri-state: omitted, explicit `null` (clear), or a value. When `tag_ids`
/// is present, even empty, the prompt's tag set is replaced wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePrompt {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "promptdir_core::patch::present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "promptdir_core::patch::present")]
    pub category_id: Option<Option<DbId>>,
    pub is_favorite: Option<bool>,
    pub tag_ids: Option<Vec<DbId>>,
}

impl UpdatePrompt {
    /// Whether any column of the `prompts` row would change.
    pub fn has_column_changes(&self) -> bool {
        self.title.is_some()
            || self.content.is_some()
            || self.description.is_some()
            || self.category_id.is_some()
            || self.is_favorite.is_some()
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Caller-facing prompt filter.
///
/// Filters combine with AND; `tag_ids` matches prompts carrying ANY of the
/// tags and `search` matches title OR content OR description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptFilter {
    pub search: Option<String>,
    pub category_id: Option<DbId>,
    pub tag_ids: Vec<DbId>,
    pub favorites_only: bool,
}

/// A fully composed `prompts` selection handed to the store.
///
/// Tag filtering has already been resolved into `ids` and the search term
/// has already been trimmed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptQuery {
    pub favorites_only: bool,
    pub category_id: Option<DbId>,
    /// Restrict to these prompt ids when set.
    pub ids: Option<Vec<DbId>>,
    /// Case-insensitive substring matched against title, content, description.
    pub search: Option<String>,
}
