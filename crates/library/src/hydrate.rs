//! Relation hydration: attach each prompt's category and tags.

use std::collections::{BTreeSet, HashMap};

use promptdir_core::error::CoreError;
use promptdir_core::types::DbId;
use promptdir_db::models::category::Category;
use promptdir_db::models::prompt::{Prompt, PromptWithRelations};
use promptdir_db::models::tag::Tag;
use promptdir_db::store::PromptStore;

use crate::error::LibraryResult;

/// Resolve categories and tags for `prompts`, preserving input order.
///
/// Issues at most two store calls regardless of how many prompts are given,
/// run concurrently: one batched category lookup (skipped when no prompt has
/// a category) and one batched tag-link lookup. An empty input makes no
/// calls at all.
pub async fn hydrate(
    store: &dyn PromptStore,
    prompts: Vec<Prompt>,
) -> LibraryResult<Vec<PromptWithRelations>> {
    if prompts.is_empty() {
        return Ok(Vec::new());
    }

    let category_ids: Vec<DbId> = prompts
        .iter()
        .filter_map(|p| p.category_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let prompt_ids: Vec<DbId> = prompts.iter().map(|p| p.id).collect();

    let categories = async {
        if category_ids.is_empty() {
            Ok(Vec::new())
        } else {
            store.categories_by_ids(&category_ids).await
        }
    };
    let tag_rows = store.tags_for_prompts(&prompt_ids);
    let (categories, tag_rows) = tokio::try_join!(categories, tag_rows)?;

    let category_map: HashMap<DbId, Category> =
        categories.into_iter().map(|c| (c.id, c)).collect();
    let mut tags_by_prompt: HashMap<DbId, Vec<Tag>> = HashMap::new();
    for row in tag_rows {
        tags_by_prompt.entry(row.prompt_id).or_default().push(row.tag);
    }

    Ok(prompts
        .into_iter()
        .map(|prompt| {
            let category = prompt
                .category_id
                .and_then(|id| category_map.get(&id).cloned());
            let tags = tags_by_prompt.remove(&prompt.id).unwrap_or_default();
            PromptWithRelations {
                prompt,
                category,
                tags,
            }
        })
        .collect())
}

/// Hydrate a single prompt.
pub async fn hydrate_one(
    store: &dyn PromptStore,
    prompt: Prompt,
) -> LibraryResult<PromptWithRelations> {
    let id = prompt.id;
    hydrate(store, vec![prompt])
        .await?
        .pop()
        .ok_or_else(|| CoreError::Internal(format!("hydration dropped prompt {id}")).into())
}
