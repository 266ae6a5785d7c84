//! Repository for the `categories` table.

use sqlx::PgPool;
use promptdir_core::types::DbId;

use crate::models::category::Category;

/// Column list for categories queries.
const COLUMNS: &str = "id, name, slug, description, parent_id, sort_order, created_at, updated_at";

/// Read access to categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories, ordered by `sort_order` ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY sort_order ASC, name ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Batch lookup of categories by ID. Unknown IDs are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = ANY($1)");
        sqlx::query_as::<_, Category>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
