//! Prompt query composer.

use promptdir_core::search::normalize_term;
use promptdir_db::models::prompt::{PromptFilter, PromptQuery, PromptWithRelations};
use promptdir_db::store::PromptStore;

use crate::error::LibraryResult;
use crate::hydrate::hydrate;

/// List prompts matching `filter`, most recently updated first, hydrated.
///
/// Filters combine with AND. Tag IDs are first resolved to the prompts
/// carrying ANY of them; when none do, the result is empty and the prompt
/// table is never queried. The search term is trimmed and matched
/// case-insensitively against title, content or description.
pub async fn list_prompts(
    store: &dyn PromptStore,
    filter: &PromptFilter,
) -> LibraryResult<Vec<PromptWithRelations>> {
    let mut query = PromptQuery {
        favorites_only: filter.favorites_only,
        category_id: filter.category_id,
        ids: None,
        search: normalize_term(filter.search.as_deref()),
    };

    if !filter.tag_ids.is_empty() {
        let ids = store.prompt_ids_for_tags(&filter.tag_ids).await?;
        if ids.is_empty() {
            tracing::debug!(tag_ids = ?filter.tag_ids, "No prompts carry the requested tags");
            return Ok(Vec::new());
        }
        query.ids = Some(ids);
    }

    let prompts = store.select_prompts(&query).await?;
    tracing::debug!(count = prompts.len(), "Listed prompts");

    hydrate(store, prompts).await
}
