//! Repository for the `prompt_tags` junction table.

use sqlx::PgPool;
use promptdir_core::types::DbId;

use crate::models::tag::PromptTagRow;

/// Provides link operations between prompts and tags.
pub struct PromptTagRepo;

impl PromptTagRepo {
    /// Distinct prompt IDs linked to ANY of the given tags.
    pub async fn prompt_ids_for_tags(
        pool: &PgPool,
        tag_ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT DISTINCT prompt_id FROM prompt_tags WHERE tag_id = ANY($1)",
        )
        .bind(tag_ids)
        .fetch_all(pool)
        .await
    }

    /// All tags linked to any of the given prompts, joined to the tag rows.
    pub async fn tags_for_prompts(
        pool: &PgPool,
        prompt_ids: &[DbId],
    ) -> Result<Vec<PromptTagRow>, sqlx::Error> {
        sqlx::query_as::<_, PromptTagRow>(
            "SELECT pt.prompt_id, t.id, t.name, t.slug, t.created_at \
             FROM prompt_tags pt \
             JOIN tags t ON t.id = pt.tag_id \
             WHERE pt.prompt_id = ANY($1) \
             ORDER BY t.name",
        )
        .bind(prompt_ids)
        .fetch_all(pool)
        .await
    }

    /// Insert one link per tag. Duplicate tag IDs in the input are ignored.
    pub async fn insert_links(
        pool: &PgPool,
        prompt_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO prompt_tags (prompt_id, tag_id) \
             SELECT $1, UNNEST($2::BIGINT[]) \
             ON CONFLICT DO NOTHING",
        )
        .bind(prompt_id)
        .bind(tag_ids)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove every link of a prompt. Returns the number of links removed.
    pub async fn delete_links(pool: &PgPool, prompt_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prompt_tags WHERE prompt_id = $1")
            .bind(prompt_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
