//! In-process [`PromptStore`].
//!
//! Mirrors the Postgres schema's behaviour: `updated_at DESC` ordering,
//! foreign keys on categories/tags/prompts, the unique tag slug, cascading
//! prompt deletes, and atomic version numbering. Every primitive call is
//! recorded so tests can count backend round trips, and individual
//! primitives can be made to fail on demand.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use promptdir_core::search::contains_ignore_case;
use promptdir_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use crate::models::category::Category;
use crate::models::prompt::{CreatePrompt, Prompt, PromptQuery, UpdatePrompt, VISIBILITY_PERSONAL};
use crate::models::prompt_version::{CreatePromptVersion, PromptVersion};
use crate::models::tag::{PromptTagRow, Tag};

use super::{
    CategoryRepository, PromptRepository, PromptStore, StoreError, StoreResult, TagRepository,
    VersionRepository,
};

#[derive(Default)]
struct Tables {
    prompts: BTreeMap<DbId, Prompt>,
    categories: BTreeMap<DbId, Category>,
    tags: BTreeMap<DbId, Tag>,
    /// `(prompt_id, tag_id)` pairs.
    prompt_tags: BTreeSet<(DbId, DbId)>,
    versions: Vec<PromptVersion>,
    last_id: DbId,
    last_timestamp: Option<Timestamp>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    /// Strictly increasing clock so `updated_at` ordering is deterministic.
    fn now(&mut self) -> Timestamp {
        let now = Utc::now();
        let ts = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(ts);
        ts
    }

    fn check_category(&self, category_id: Option<DbId>) -> StoreResult<()> {
        match category_id {
            Some(id) if !self.categories.contains_key(&id) => Err(StoreError::ForeignKeyViolation(
                "fk_prompts_category".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// A [`PromptStore`] held entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    calls: Mutex<Vec<&'static str>>,
    failing: Mutex<HashSet<&'static str>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a category. Categories have no write path through the
    /// repository traits, so this is how reference data gets in.
    pub async fn seed_category(&self, name: &str, slug: &str, sort_order: i32) -> Category {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let now = tables.now();
        let category = Category {
            id,
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            parent_id: None,
            sort_order,
            created_at: now,
            updated_at: now,
        };
        tables.categories.insert(id, category.clone());
        category
    }

    /// Names of the primitives called so far, in call order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn reset_calls(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }

    /// Make every later call to the named primitive fail with
    /// [`StoreError::Unavailable`].
    pub fn fail_on(&self, primitive: &'static str) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(primitive);
        }
    }

    pub fn clear_failures(&self) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.clear();
        }
    }

    /// Record a call and apply any injected failure.
    fn enter(&self, primitive: &'static str) -> StoreResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(primitive);
        }
        let failing = self
            .failing
            .lock()
            .map(|f| f.contains(primitive))
            .unwrap_or(false);
        if failing {
            return Err(StoreError::Unavailable(format!("{primitive} failed")));
        }
        Ok(())
    }
}

fn matches_query(prompt: &Prompt, query: &PromptQuery) -> bool {
    if query.favorites_only && !prompt.is_favorite {
        return false;
    }
    if query.category_id.is_some() && prompt.category_id != query.category_id {
        return false;
    }
    if let Some(ids) = &query.ids {
        if !ids.contains(&prompt.id) {
            return false;
        }
    }
    if let Some(term) = &query.search {
        let hit = contains_ignore_case(&prompt.title, term)
            || contains_ignore_case(&prompt.content, term)
            || prompt
                .description
                .as_deref()
                .is_some_and(|d| contains_ignore_case(d, term));
        if !hit {
            return false;
        }
    }
    true
}

#[async_trait]
impl PromptRepository for MemoryStore {
    async fn select_prompts(&self, query: &PromptQuery) -> StoreResult<Vec<Prompt>> {
        self.enter("select_prompts")?;
        let tables = self.tables.read().await;
        let mut prompts: Vec<Prompt> = tables
            .prompts
            .values()
            .filter(|p| matches_query(p, query))
            .cloned()
            .collect();
        prompts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(prompts)
    }

    async fn find_prompt(&self, id: DbId) -> StoreResult<Option<Prompt>> {
        self.enter("find_prompt")?;
        Ok(self.tables.read().await.prompts.get(&id).cloned())
    }

    async fn insert_prompt(&self, input: &CreatePrompt) -> StoreResult<Prompt> {
        self.enter("insert_prompt")?;
        let mut tables = self.tables.write().await;
        tables.check_category(input.category_id)?;

        let id = tables.next_id();
        let now = tables.now();
        let prompt = Prompt {
            id,
            title: input.title.clone(),
            content: input.content.clone(),
            description: input.description.clone(),
            category_id: input.category_id,
            is_favorite: input.is_favorite.unwrap_or(false),
            owner_id: None,
            visibility: VISIBILITY_PERSONAL.to_string(),
            team_id: None,
            created_at: now,
            updated_at: now,
        };
        tables.prompts.insert(id, prompt.clone());
        Ok(prompt)
    }

    async fn update_prompt(&self, id: DbId, input: &UpdatePrompt) -> StoreResult<Option<Prompt>> {
        self.enter("update_prompt")?;
        let mut tables = self.tables.write().await;
        if let Some(category_id) = input.category_id {
            tables.check_category(category_id)?;
        }
        if !tables.prompts.contains_key(&id) {
            return Ok(None);
        }
        let now = input.has_column_changes().then(|| tables.now());

        let Some(prompt) = tables.prompts.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = &input.title {
            prompt.title = title.clone();
        }
        if let Some(content) = &input.content {
            prompt.content = content.clone();
        }
        if let Some(description) = &input.description {
            prompt.description = description.clone();
        }
        if let Some(category_id) = input.category_id {
            prompt.category_id = category_id;
        }
        if let Some(is_favorite) = input.is_favorite {
            prompt.is_favorite = is_favorite;
        }
        if let Some(now) = now {
            prompt.updated_at = now;
        }
        Ok(Some(prompt.clone()))
    }

    async fn delete_prompt(&self, id: DbId) -> StoreResult<bool> {
        self.enter("delete_prompt")?;
        let mut tables = self.tables.write().await;
        let deleted = tables.prompts.remove(&id).is_some();
        if deleted {
            tables.prompt_tags.retain(|&(prompt_id, _)| prompt_id != id);
            tables.versions.retain(|v| v.prompt_id != id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        self.enter("list_categories")?;
        let tables = self.tables.read().await;
        let mut categories: Vec<Category> = tables.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));
        Ok(categories)
    }

    async fn categories_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<Category>> {
        self.enter("categories_by_ids")?;
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.categories.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn list_tags(&self) -> StoreResult<Vec<Tag>> {
        self.enter("list_tags")?;
        let tables = self.tables.read().await;
        let mut tags: Vec<Tag> = tables.tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn insert_tag(&self, name: &str, slug: &str) -> StoreResult<Tag> {
        self.enter("insert_tag")?;
        let mut tables = self.tables.write().await;
        if tables.tags.values().any(|t| t.slug == slug) {
            return Err(StoreError::UniqueViolation("uq_tags_slug".to_string()));
        }
        let id = tables.next_id();
        let tag = Tag {
            id,
            name: name.to_string(),
            slug: slug.to_string(),
            created_at: tables.now(),
        };
        tables.tags.insert(id, tag.clone());
        Ok(tag)
    }

    async fn prompt_ids_for_tags(&self, tag_ids: &[DbId]) -> StoreResult<Vec<DbId>> {
        self.enter("prompt_ids_for_tags")?;
        let tables = self.tables.read().await;
        let ids: BTreeSet<DbId> = tables
            .prompt_tags
            .iter()
            .filter(|(_, tag_id)| tag_ids.contains(tag_id))
            .map(|&(prompt_id, _)| prompt_id)
            .collect();
        Ok(ids.into_iter().collect())
    }

    async fn tags_for_prompts(&self, prompt_ids: &[DbId]) -> StoreResult<Vec<PromptTagRow>> {
        self.enter("tags_for_prompts")?;
        let tables = self.tables.read().await;
        let mut rows: Vec<PromptTagRow> = tables
            .prompt_tags
            .iter()
            .filter(|(prompt_id, _)| prompt_ids.contains(prompt_id))
            .filter_map(|&(prompt_id, tag_id)| {
                tables.tags.get(&tag_id).map(|tag| PromptTagRow {
                    prompt_id,
                    tag: tag.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| a.tag.name.cmp(&b.tag.name));
        Ok(rows)
    }

    async fn insert_prompt_tags(&self, prompt_id: DbId, tag_ids: &[DbId]) -> StoreResult<()> {
        self.enter("insert_prompt_tags")?;
        let mut tables = self.tables.write().await;
        if !tables.prompts.contains_key(&prompt_id) {
            return Err(StoreError::ForeignKeyViolation(
                "fk_prompt_tags_prompt".to_string(),
            ));
        }
        if tag_ids.iter().any(|id| !tables.tags.contains_key(id)) {
            return Err(StoreError::ForeignKeyViolation(
                "fk_prompt_tags_tag".to_string(),
            ));
        }
        for &tag_id in tag_ids {
            tables.prompt_tags.insert((prompt_id, tag_id));
        }
        Ok(())
    }

    async fn delete_prompt_tags(&self, prompt_id: DbId) -> StoreResult<u64> {
        self.enter("delete_prompt_tags")?;
        let mut tables = self.tables.write().await;
        let before = tables.prompt_tags.len();
        tables.prompt_tags.retain(|&(id, _)| id != prompt_id);
        Ok((before - tables.prompt_tags.len()) as u64)
    }
}

#[async_trait]
impl VersionRepository for MemoryStore {
    async fn insert_version(&self, input: &CreatePromptVersion) -> StoreResult<PromptVersion> {
        self.enter("insert_version")?;
        let mut tables = self.tables.write().await;
        if !tables.prompts.contains_key(&input.prompt_id) {
            return Err(StoreError::ForeignKeyViolation(
                "fk_prompt_versions_prompt".to_string(),
            ));
        }
        let version_number = tables
            .versions
            .iter()
            .filter(|v| v.prompt_id == input.prompt_id)
            .map(|v| v.version_number)
            .max()
            .unwrap_or(0)
            + 1;
        let id = tables.next_id();
        let version = PromptVersion {
            id,
            prompt_id: input.prompt_id,
            version_number,
            title: input.title.clone(),
            content: input.content.clone(),
            description: input.description.clone(),
            created_at: tables.now(),
        };
        tables.versions.push(version.clone());
        Ok(version)
    }

    async fn list_versions(&self, prompt_id: DbId) -> StoreResult<Vec<PromptVersion>> {
        self.enter("list_versions")?;
        let tables = self.tables.read().await;
        let mut versions: Vec<PromptVersion> = tables
            .versions
            .iter()
            .filter(|v| v.prompt_id == prompt_id)
            .cloned()
            .collect();
        versions.sort_by(|a, b| b.version_number.cmp(&a.version_number));
        Ok(versions)
    }

    async fn count_versions(&self, prompt_id: DbId) -> StoreResult<i64> {
        self.enter("count_versions")?;
        let tables = self.tables.read().await;
        Ok(tables.versions.iter().filter(|v| v.prompt_id == prompt_id).count() as i64)
    }
}

#[async_trait]
impl PromptStore for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        self.enter("health_check")
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn new_prompt(title: &str, content: &str) -> CreatePrompt {
        CreatePrompt {
            title: title.to_string(),
            content: content.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn insert_applies_defaults() {
        let store = MemoryStore::new();
        let prompt = store.insert_prompt(&new_prompt("t", "c")).await.unwrap();
        assert!(!prompt.is_favorite);
        assert_eq!(prompt.description, None);
        assert_eq!(prompt.category_id, None);
        assert_eq!(prompt.visibility, "personal");
    }

    #[tokio::test]
    async fn unknown_category_is_rejected() {
        let store = MemoryStore::new();
        let input = CreatePrompt {
            category_id: Some(42),
            ..new_prompt("t", "c")
        };
        let err = store.insert_prompt(&input).await.unwrap_err();
        assert_matches!(err, StoreError::ForeignKeyViolation(c) if c == "fk_prompts_category");
    }

    #[tokio::test]
    async fn select_orders_by_most_recent_update() {
        let store = MemoryStore::new();
        let first = store.insert_prompt(&new_prompt("first", "c")).await.unwrap();
        let second = store.insert_prompt(&new_prompt("second", "c")).await.unwrap();

        let ids: Vec<DbId> = store
            .select_prompts(&PromptQuery::default())
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);

        let touch = UpdatePrompt {
            is_favorite: Some(true),
            ..Default::default()
        };
        store.update_prompt(first.id, &touch).await.unwrap();
        let ids: Vec<DbId> = store
            .select_prompts(&PromptQuery::default())
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn duplicate_tag_slug_is_rejected() {
        let store = MemoryStore::new();
        store.insert_tag("Rust", "rust").await.unwrap();
        let err = store.insert_tag("rust", "rust").await.unwrap_err();
        assert_eq!(err.unique_violation(), Some("uq_tags_slug"));
        assert_matches!(err, StoreError::UniqueViolation(c) if c == "uq_tags_slug");
    }

    #[tokio::test]
    async fn version_numbers_increase_per_prompt() {
        let store = MemoryStore::new();
        let a = store.insert_prompt(&new_prompt("a", "a")).await.unwrap();
        let b = store.insert_prompt(&new_prompt("b", "b")).await.unwrap();
        let snapshot = |p: &Prompt| CreatePromptVersion {
            prompt_id: p.id,
            title: p.title.clone(),
            content: p.content.clone(),
            description: None,
        };

        assert_eq!(store.insert_version(&snapshot(&a)).await.unwrap().version_number, 1);
        assert_eq!(store.insert_version(&snapshot(&a)).await.unwrap().version_number, 2);
        assert_eq!(store.insert_version(&snapshot(&b)).await.unwrap().version_number, 1);

        let numbers: Vec<i32> = store
            .list_versions(a.id)
            .await
            .unwrap()
            .iter()
            .map(|v| v.version_number)
            .collect();
        assert_eq!(numbers, vec![2, 1]);
    }

    #[tokio::test]
    async fn delete_cascades_to_links_and_versions() {
        let store = MemoryStore::new();
        let tag = store.insert_tag("Rust", "rust").await.unwrap();
        let prompt = store.insert_prompt(&new_prompt("t", "c")).await.unwrap();
        store.insert_prompt_tags(prompt.id, &[tag.id]).await.unwrap();
        store
            .insert_version(&CreatePromptVersion {
                prompt_id: prompt.id,
                title: "t".into(),
                content: "c".into(),
                description: None,
            })
            .await
            .unwrap();

        assert!(store.delete_prompt(prompt.id).await.unwrap());
        assert!(store.tags_for_prompts(&[prompt.id]).await.unwrap().is_empty());
        assert!(store.list_versions(prompt.id).await.unwrap().is_empty());
        assert!(!store.delete_prompt(prompt.id).await.unwrap());
    }

    #[tokio::test]
    async fn injected_failure_is_recorded_and_returned() {
        let store = MemoryStore::new();
        store.fail_on("list_tags");
        let err = store.list_tags().await.unwrap_err();
        assert_matches!(err, StoreError::Unavailable(_));
        assert_eq!(store.calls(), vec!["list_tags"]);

        store.clear_failures();
        assert!(store.list_tags().await.is_ok());
    }
}
