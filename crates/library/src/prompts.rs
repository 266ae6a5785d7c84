//! Prompt lifecycle: create, get, update with version snapshots, favorite
//! toggle, delete, and version history.

use promptdir_core::prompt::{requires_snapshot, validate_content, validate_title};
use promptdir_core::types::DbId;
use promptdir_db::models::prompt::{CreatePrompt, PromptWithRelations, UpdatePrompt};
use promptdir_db::models::prompt_version::{CreatePromptVersion, PromptVersion};
use promptdir_db::store::PromptStore;

use crate::error::{prompt_not_found, LibraryError, LibraryResult};
use crate::hydrate::hydrate_one;

/// Fetch one hydrated prompt.
pub async fn get(store: &dyn PromptStore, id: DbId) -> LibraryResult<PromptWithRelations> {
    let prompt = store
        .find_prompt(id)
        .await?
        .ok_or_else(|| prompt_not_found(id))?;
    hydrate_one(store, prompt).await
}

/// Insert a prompt and link its initial tags. History starts empty.
///
/// Title and content are expected to be trimmed by the caller. If linking
/// tags fails, the error is returned but the prompt row stays, untagged.
pub async fn create(
    store: &dyn PromptStore,
    input: &CreatePrompt,
) -> LibraryResult<PromptWithRelations> {
    validate_title(&input.title)?;
    validate_content(&input.content)?;

    let prompt = store.insert_prompt(input).await?;

    if let Some(tag_ids) = input.tag_ids.as_deref().filter(|ids| !ids.is_empty()) {
        store.insert_prompt_tags(prompt.id, tag_ids).await?;
    }

    tracing::info!(
        prompt_id = prompt.id,
        tag_count = input.tag_ids.as_ref().map_or(0, Vec::len),
        "Prompt created"
    );

    hydrate_one(store, prompt).await
}

/// Apply a partial update, snapshotting the current title/content/description
/// first when the title or content actually changes.
///
/// Steps, each a separate store call:
/// 1. fetch the current prompt (not found fails here)
/// 2. insert a version snapshot if title or content differ by value
/// 3. update the provided columns
/// 4. when `tag_ids` is present, delete all links then insert the new set
/// 5. re-fetch the hydrated prompt
///
/// A failure after step 2 leaves the snapshot in place even though the
/// content never changed.
pub async fn update(
    store: &dyn PromptStore,
    id: DbId,
    input: &UpdatePrompt,
) -> LibraryResult<PromptWithRelations> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(content) = &input.content {
        validate_content(content)?;
    }

    let current = get(store, id).await?.prompt;

    if requires_snapshot(
        &current.title,
        &current.content,
        input.title.as_deref(),
        input.content.as_deref(),
    ) {
        let version = store
            .insert_version(&CreatePromptVersion {
                prompt_id: current.id,
                title: current.title.clone(),
                content: current.content.clone(),
                description: current.description.clone(),
            })
            .await?;
        tracing::info!(
            prompt_id = id,
            version_number = version.version_number,
            "Prompt version snapshot saved"
        );
    }

    if input.has_column_changes() {
        store.update_prompt(id, input).await?;
    }

    if let Some(tag_ids) = &input.tag_ids {
        let removed = store.delete_prompt_tags(id).await?;
        if !tag_ids.is_empty() {
            store.insert_prompt_tags(id, tag_ids).await?;
        }
        tracing::debug!(prompt_id = id, removed, added = tag_ids.len(), "Prompt tags replaced");
    }

    let updated = store
        .find_prompt(id)
        .await?
        .ok_or(LibraryError::MissingAfterUpdate(id))?;

    tracing::info!(prompt_id = id, "Prompt updated");

    hydrate_one(store, updated).await
}

/// Flip the favorite flag. Never creates a version snapshot.
pub async fn toggle_favorite(
    store: &dyn PromptStore,
    id: DbId,
) -> LibraryResult<PromptWithRelations> {
    let current = store
        .find_prompt(id)
        .await?
        .ok_or_else(|| prompt_not_found(id))?;

    let input = UpdatePrompt {
        is_favorite: Some(!current.is_favorite),
        ..Default::default()
    };
    update(store, id, &input).await
}

/// Delete a prompt. Its tag links and versions go with it.
pub async fn delete(store: &dyn PromptStore, id: DbId) -> LibraryResult<()> {
    if !store.delete_prompt(id).await? {
        return Err(prompt_not_found(id));
    }
    tracing::info!(prompt_id = id, "Prompt deleted");
    Ok(())
}

/// Version history of an existing prompt, newest first.
pub async fn versions(store: &dyn PromptStore, id: DbId) -> LibraryResult<Vec<PromptVersion>> {
    if store.find_prompt(id).await?.is_none() {
        return Err(prompt_not_found(id));
    }
    Ok(store.list_versions(id).await?)
}
