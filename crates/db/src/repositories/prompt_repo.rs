//! Repository for the `prompts` table.

use sqlx::PgPool;
use promptdir_core::search::ilike_pattern;
use promptdir_core::types::DbId;

use crate::models::prompt::{CreatePrompt, Prompt, PromptQuery, UpdatePrompt};

/// Column list for prompts queries.
const COLUMNS: &str = "id, title, content, description, category_id, is_favorite, \
    owner_id, visibility, team_id, created_at, updated_at";

/// Provides CRUD operations for prompts.
pub struct PromptRepo;

impl PromptRepo {
    /// Select prompts matching a composed query, most recently updated first.
    ///
    /// Each predicate is disabled by binding `NULL` (or `FALSE` for the
    /// favorites flag), so one statement serves every filter combination.
    pub async fn list(pool: &PgPool, query: &PromptQuery) -> Result<Vec<Prompt>, sqlx::Error> {
        let pattern = query.search.as_deref().map(ilike_pattern);
        let sql = format!(
            "SELECT {COLUMNS} FROM prompts
             WHERE ($1 = FALSE OR is_favorite = TRUE)
               AND ($2::BIGINT IS NULL OR category_id = $2)
               AND ($3::BIGINT[] IS NULL OR id = ANY($3))
               AND ($4::TEXT IS NULL
                    OR title ILIKE $4
                    OR content ILIKE $4
                    OR description ILIKE $4)
             ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, Prompt>(&sql)
            .bind(query.favorites_only)
            .bind(query.category_id)
            .bind(query.ids.as_deref())
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Find a prompt by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompts WHERE id = $1");
        sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a prompt row. Tag links are inserted separately.
    pub async fn create(pool: &PgPool, input: &CreatePrompt) -> Result<Prompt, sqlx::Error> {
        let query = format!(
            "INSERT INTO prompts (title, content, description, category_id, is_favorite)
             VALUES ($1, $2, $3, $4, COALESCE($5, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(input.is_favorite)
            .fetch_one(pool)
            .await
    }

    /// Apply the provided fields of `input`; omitted fields keep their value
    /// and explicit `null`s clear nullable columns. `tag_ids` is ignored.
    ///
    /// Returns `None` if no prompt with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePrompt,
    ) -> Result<Option<Prompt>, sqlx::Error> {
        if !input.has_column_changes() {
            return Self::find_by_id(pool, id).await;
        }

        let mut set_clauses: Vec<String> = Vec::new();
        let mut param_idx: usize = 2; // $1 is id

        if input.title.is_some() {
            set_clauses.push(format!("title = ${param_idx}"));
            param_idx += 1;
        }
        if input.content.is_some() {
            set_clauses.push(format!("content = ${param_idx}"));
            param_idx += 1;
        }
        if input.description.is_some() {
            set_clauses.push(format!("description = ${param_idx}"));
            param_idx += 1;
        }
        if input.category_id.is_some() {
            set_clauses.push(format!("category_id = ${param_idx}"));
            param_idx += 1;
        }
        if input.is_favorite.is_some() {
            set_clauses.push(format!("is_favorite = ${param_idx}"));
        }
        set_clauses.push("updated_at = NOW()".to_string());

        let query = format!(
            "UPDATE prompts SET {} WHERE id = $1 RETURNING {COLUMNS}",
            set_clauses.join(", ")
        );

        let mut q = sqlx::query_as::<_, Prompt>(&query).bind(id);
        if let Some(ref title) = input.title {
            q = q.bind(title);
        }
        if let Some(ref content) = input.content {
            q = q.bind(content);
        }
        if let Some(ref description) = input.description {
            q = q.bind(description);
        }
        if let Some(category_id) = input.category_id {
            q = q.bind(category_id);
        }
        if let Some(is_favorite) = input.is_favorite {
            q = q.bind(is_favorite);
        }

        q.fetch_optional(pool).await
    }

    /// Delete a prompt by ID. Links and versions cascade.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prompts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
