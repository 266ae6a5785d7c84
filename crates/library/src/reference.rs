//! Category and tag reference data.

use promptdir_core::prompt::validate_tag_name;
use promptdir_core::slug::slugify;
use promptdir_db::models::category::Category;
use promptdir_db::models::tag::Tag;
use promptdir_db::store::PromptStore;

use crate::error::LibraryResult;

/// All categories, ordered by sort order then name.
pub async fn list_categories(store: &dyn PromptStore) -> LibraryResult<Vec<Category>> {
    Ok(store.list_categories().await?)
}

/// All tags, ordered by name.
pub async fn list_tags(store: &dyn PromptStore) -> LibraryResult<Vec<Tag>> {
    Ok(store.list_tags().await?)
}

/// Create a tag with a slug derived from its trimmed name.
///
/// A second tag with the same slug fails with [`CoreError::Conflict`].
///
/// [`CoreError::Conflict`]: promptdir_core::error::CoreError::Conflict
pub async fn create_tag(store: &dyn PromptStore, name: &str) -> LibraryResult<Tag> {
    let name = name.trim();
    validate_tag_name(name)?;
    let slug = slugify(name);
    let tag = store.insert_tag(name, &slug).await?;
    tracing::info!(tag_id = tag.id, slug = %tag.slug, "Tag created");
    Ok(tag)
}
