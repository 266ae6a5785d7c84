//! Category model. Categories are read-only reference data.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use promptdir_core::types::{DbId, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Declared for nesting; no operation reads it yet.
    pub parent_id: Option<DbId>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
