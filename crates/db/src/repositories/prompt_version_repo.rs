//! Repository for the `prompt_versions` table.

use sqlx::PgPool;
use promptdir_core::types::DbId;

use crate::models::prompt_version::{CreatePromptVersion, PromptVersion};

/// Column list for prompt_versions queries.
const COLUMNS: &str = "id, prompt_id, version_number, title, content, description, created_at";

/// Provides insert/list operations for prompt versions.
pub struct PromptVersionRepo;

impl PromptVersionRepo {
    /// Insert a new snapshot, numbering it one past the prompt's existing
    /// versions in the same statement. Returns the created row.
    ///
    /// Two concurrent inserts for the same prompt cannot both succeed with
    /// the same number: `uq_prompt_versions_number` rejects the loser.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePromptVersion,
    ) -> Result<PromptVersion, sqlx::Error> {
        let query = format!(
            "INSERT INTO prompt_versions
                (prompt_id, version_number, title, content, description)
             VALUES ($1,
                     COALESCE((SELECT MAX(version_number) FROM prompt_versions WHERE prompt_id = $1), 0) + 1,
                     $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromptVersion>(&query)
            .bind(input.prompt_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// List all versions of a prompt, newest first.
    pub async fn list_for_prompt(
        pool: &PgPool,
        prompt_id: DbId,
    ) -> Result<Vec<PromptVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompt_versions
             WHERE prompt_id = $1
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, PromptVersion>(&query)
            .bind(prompt_id)
            .fetch_all(pool)
            .await
    }

    /// Count the versions recorded for a prompt.
    pub async fn count_for_prompt(pool: &PgPool, prompt_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM prompt_versions WHERE prompt_id = $1")
                .bind(prompt_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
