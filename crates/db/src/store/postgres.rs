//! [`PromptStore`] backed by PostgreSQL.

use async_trait::async_trait;
use promptdir_core::types::DbId;

use crate::models::category::Category;
use crate::models::prompt::{CreatePrompt, Prompt, PromptQuery, UpdatePrompt};
use crate::models::prompt_version::{CreatePromptVersion, PromptVersion};
use crate::models::tag::{PromptTagRow, Tag};
use crate::repositories::{CategoryRepo, PromptRepo, PromptTagRepo, PromptVersionRepo, TagRepo};
use crate::DbPool;

use super::{
    CategoryRepository, PromptRepository, PromptStore, StoreResult, TagRepository,
    VersionRepository,
};

/// Delegates every primitive to the SQL repositories.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl PromptRepository for PgStore {
    async fn select_prompts(&self, query: &PromptQuery) -> StoreResult<Vec<Prompt>> {
        Ok(PromptRepo::list(&self.pool, query).await?)
    }

    async fn find_prompt(&self, id: DbId) -> StoreResult<Option<Prompt>> {
        Ok(PromptRepo::find_by_id(&self.pool, id).await?)
    }

    async fn insert_prompt(&self, input: &CreatePrompt) -> StoreResult<Prompt> {
        Ok(PromptRepo::create(&self.pool, input).await?)
    }

    async fn update_prompt(&self, id: DbId, input: &UpdatePrompt) -> StoreResult<Option<Prompt>> {
        Ok(PromptRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_prompt(&self, id: DbId) -> StoreResult<bool> {
        Ok(PromptRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl CategoryRepository for PgStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(CategoryRepo::list(&self.pool).await?)
    }

    async fn categories_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<Category>> {
        Ok(CategoryRepo::find_by_ids(&self.pool, ids).await?)
    }
}

#[async_trait]
impl TagRepository for PgStore {
    async fn list_tags(&self) -> StoreResult<Vec<Tag>> {
        Ok(TagRepo::list(&self.pool).await?)
    }

    async fn insert_tag(&self, name: &str, slug: &str) -> StoreResult<Tag> {
        Ok(TagRepo::create(&self.pool, name, slug).await?)
    }

    async fn prompt_ids_for_tags(&self, tag_ids: &[DbId]) -> StoreResult<Vec<DbId>> {
        Ok(PromptTagRepo::prompt_ids_for_tags(&self.pool, tag_ids).await?)
    }

    async fn tags_for_prompts(&self, prompt_ids: &[DbId]) -> StoreResult<Vec<PromptTagRow>> {
        Ok(PromptTagRepo::tags_for_prompts(&self.pool, prompt_ids).await?)
    }

    async fn insert_prompt_tags(&self, prompt_id: DbId, tag_ids: &[DbId]) -> StoreResult<()> {
        Ok(PromptTagRepo::insert_links(&self.pool, prompt_id, tag_ids).await?)
    }

    async fn delete_prompt_tags(&self, prompt_id: DbId) -> StoreResult<u64> {
        Ok(PromptTagRepo::delete_links(&self.pool, prompt_id).await?)
    }
}

#[async_trait]
impl VersionRepository for PgStore {
    async fn insert_version(&self, input: &CreatePromptVersion) -> StoreResult<PromptVersion> {
        Ok(PromptVersionRepo::create(&self.pool, input).await?)
    }

    async fn list_versions(&self, prompt_id: DbId) -> StoreResult<Vec<PromptVersion>> {
        Ok(PromptVersionRepo::list_for_prompt(&self.pool, prompt_id).await?)
    }

    async fn count_versions(&self, prompt_id: DbId) -> StoreResult<i64> {
        Ok(PromptVersionRepo::count_for_prompt(&self.pool, prompt_id).await?)
    }
}

#[async_trait]
impl PromptStore for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
