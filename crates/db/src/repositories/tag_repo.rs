//! Repository for the `tags` table.

use sqlx::PgPool;

use crate::models::tag::Tag;

/// Column list for `tags` queries.
const COLUMNS: &str = "id, name, slug, created_at";

/// Provides list/create operations for tags.
pub struct TagRepo;

impl TagRepo {
    /// List all tags ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags ORDER BY name ASC");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    /// Insert a tag with a precomputed slug.
    ///
    /// A duplicate slug violates `uq_tags_slug`.
    pub async fn create(pool: &PgPool, name: &str, slug: &str) -> Result<Tag, sqlx::Error> {
        let query = format!("INSERT INTO tags (name, slug) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .bind(slug)
            .fetch_one(pool)
            .await
    }
}
