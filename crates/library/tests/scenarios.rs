//! End-to-end prompt library workflows against the in-memory store.

use assert_matches::assert_matches;
use promptdir_core::error::CoreError;
use promptdir_db::models::prompt::{CreatePrompt, PromptFilter, PromptWithRelations, UpdatePrompt};
use promptdir_db::store::{MemoryStore, VersionRepository};
use promptdir_library::{prompts, query, reference, LibraryError};

fn new_prompt(title: &str, content: &str) -> CreatePrompt {
    CreatePrompt {
        title: title.to_string(),
        content: content.to_string(),
        ..Default::default()
    }
}

fn tag_names(prompt: &PromptWithRelations) -> Vec<&str> {
    prompt.tags.iter().map(|t| t.name.as_str()).collect()
}

#[tokio::test]
async fn code_review_lifecycle() {
    let store = MemoryStore::new();

    let created = prompts::create(&store, &new_prompt("Code Review", "Review {{diff}}"))
        .await
        .unwrap();

    let fetched = prompts::get(&store, created.prompt.id).await.unwrap();
    assert_eq!(fetched.prompt.title, "Code Review");
    assert_eq!(fetched.prompt.content, "Review {{diff}}");
    assert!(fetched.tags.is_empty());
    assert_eq!(fetched.category, None);
    assert!(!fetched.prompt.is_favorite);

    let update = UpdatePrompt {
        content: Some("Review {{diff}} carefully".into()),
        ..Default::default()
    };
    let updated = prompts::update(&store, created.prompt.id, &update).await.unwrap();
    assert_eq!(updated.prompt.content, "Review {{diff}} carefully");

    let history = prompts::versions(&store, created.prompt.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].version_number, 1);
    assert_eq!(history[0].title, "Code Review");
    assert_eq!(history[0].content, "Review {{diff}}");

    let hits = query::list_prompts(
        &store,
        &PromptFilter {
            search: Some("review".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].prompt.id, created.prompt.id);

    let misses = query::list_prompts(
        &store,
        &PromptFilter {
            search: Some("zzz".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(misses.is_empty());
}

#[tokio::test]
async fn toggling_favorite_twice_restores_flag_without_versions() {
    let store = MemoryStore::new();
    let created = prompts::create(&store, &new_prompt("Standup", "Summarize {{notes}}"))
        .await
        .unwrap();

    let once = prompts::toggle_favorite(&store, created.prompt.id).await.unwrap();
    assert!(once.prompt.is_favorite);
    let twice = prompts::toggle_favorite(&store, created.prompt.id).await.unwrap();
    assert!(!twice.prompt.is_favorite);

    assert_eq!(store.count_versions(created.prompt.id).await.unwrap(), 0);
}

#[tokio::test]
async fn toggle_favorite_on_missing_prompt_is_not_found() {
    let store = MemoryStore::new();
    let err = prompts::toggle_favorite(&store, 42).await.unwrap_err();
    assert_matches!(err, LibraryError::Core(CoreError::NotFound { id: 42, .. }));
}

#[tokio::test]
async fn each_content_change_appends_the_next_version() {
    let store = MemoryStore::new();
    let id = prompts::create(&store, &new_prompt("Draft", "v1"))
        .await
        .unwrap()
        .prompt
        .id;

    for next in ["v2", "v3", "v4"] {
        let prior = store.count_versions(id).await.unwrap();
        let update = UpdatePrompt {
            content: Some(next.into()),
            ..Default::default()
        };
        prompts::update(&store, id, &update).await.unwrap();

        let history = prompts::versions(&store, id).await.unwrap();
        assert_eq!(history.len() as i64, prior + 1);
        assert_eq!(i64::from(history[0].version_number), prior + 1);
    }

    let contents: Vec<String> = prompts::versions(&store, id)
        .await
        .unwrap()
        .into_iter()
        .map(|v| v.content)
        .collect();
    assert_eq!(contents, ["v3", "v2", "v1"]);
}

#[tokio::test]
async fn favorite_only_update_creates_no_version() {
    let store = MemoryStore::new();
    let id = prompts::create(&store, &new_prompt("t", "c")).await.unwrap().prompt.id;

    let update = UpdatePrompt {
        is_favorite: Some(true),
        ..Default::default()
    };
    let updated = prompts::update(&store, id, &update).await.unwrap();
    assert!(updated.prompt.is_favorite);
    assert_eq!(store.count_versions(id).await.unwrap(), 0);
}

#[tokio::test]
async fn snapshot_keeps_the_pre_update_description() {
    let store = MemoryStore::new();
    let id = prompts::create(
        &store,
        &CreatePrompt {
            description: Some("old notes".into()),
            ..new_prompt("Old title", "c")
        },
    )
    .await
    .unwrap()
    .prompt
    .id;

    let update = UpdatePrompt {
        title: Some("New title".into()),
        description: Some(Some("new notes".into())),
        ..Default::default()
    };
    prompts::update(&store, id, &update).await.unwrap();

    let history = prompts::versions(&store, id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].title, "Old title");
    assert_eq!(history[0].description.as_deref(), Some("old notes"));
}

#[tokio::test]
async fn create_with_tags_then_fetch() {
    let store = MemoryStore::new();
    let a = reference::create_tag(&store, "A").await.unwrap();
    let b = reference::create_tag(&store, "B").await.unwrap();

    let created = prompts::create(
        &store,
        &CreatePrompt {
            tag_ids: Some(vec![b.id, a.id]),
            ..new_prompt("Tagged", "c")
        },
    )
    .await
    .unwrap();
    assert_eq!(tag_names(&created), ["A", "B"]);

    let fetched = prompts::get(&store, created.prompt.id).await.unwrap();
    assert_eq!(tag_names(&fetched), ["A", "B"]);
}

#[tokio::test]
async fn empty_tag_ids_clears_and_omitted_tag_ids_keeps() {
    let store = MemoryStore::new();
    let tag = reference::create_tag(&store, "Keep").await.unwrap();
    let id = prompts::create(
        &store,
        &CreatePrompt {
            tag_ids: Some(vec![tag.id]),
            ..new_prompt("t", "c")
        },
    )
    .await
    .unwrap()
    .prompt
    .id;

    let rename = UpdatePrompt {
        title: Some("renamed".into()),
        ..Default::default()
    };
    let kept = prompts::update(&store, id, &rename).await.unwrap();
    assert_eq!(tag_names(&kept), ["Keep"]);

    let clear = UpdatePrompt {
        tag_ids: Some(Vec::new()),
        ..Default::default()
    };
    let cleared = prompts::update(&store, id, &clear).await.unwrap();
    assert!(cleared.tags.is_empty());
}

#[tokio::test]
async fn tag_only_update_skips_the_row_update() {
    let store = MemoryStore::new();
    let tag = reference::create_tag(&store, "New").await.unwrap();
    let id = prompts::create(&store, &new_prompt("t", "c")).await.unwrap().prompt.id;
    store.reset_calls();

    let update = UpdatePrompt {
        tag_ids: Some(vec![tag.id]),
        ..Default::default()
    };
    let updated = prompts::update(&store, id, &update).await.unwrap();
    assert_eq!(tag_names(&updated), ["New"]);

    let calls = store.calls();
    assert!(!calls.contains(&"update_prompt"));
    assert!(!calls.contains(&"insert_version"));
}

#[tokio::test]
async fn filters_intersect() {
    let store = MemoryStore::new();
    let coding = store.seed_category("Coding", "coding", 0).await;
    let rust = reference::create_tag(&store, "Rust").await.unwrap();

    let matching = prompts::create(
        &store,
        &CreatePrompt {
            category_id: Some(coding.id),
            is_favorite: Some(true),
            tag_ids: Some(vec![rust.id]),
            ..new_prompt("Refactor helper", "Refactor this function")
        },
    )
    .await
    .unwrap();
    // Same tag and search hit but not a favorite.
    prompts::create(
        &store,
        &CreatePrompt {
            category_id: Some(coding.id),
            tag_ids: Some(vec![rust.id]),
            ..new_prompt("Refactor module", "c")
        },
    )
    .await
    .unwrap();
    // Favorite in the category but without the tag.
    prompts::create(
        &store,
        &CreatePrompt {
            category_id: Some(coding.id),
            is_favorite: Some(true),
            ..new_prompt("Refactor notes", "c")
        },
    )
    .await
    .unwrap();

    let filter = PromptFilter {
        search: Some("REFACTOR".into()),
        category_id: Some(coding.id),
        tag_ids: vec![rust.id],
        favorites_only: true,
    };
    let hits = query::list_prompts(&store, &filter).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].prompt.id, matching.prompt.id);
    assert_eq!(hits[0].category.as_ref().map(|c| c.slug.as_str()), Some("coding"));
}

#[tokio::test]
async fn search_matches_content_or_description_alone() {
    let store = MemoryStore::new();
    let in_content = prompts::create(&store, &new_prompt("First", "Find the NeedleX"))
        .await
        .unwrap();
    let in_description = prompts::create(
        &store,
        &CreatePrompt {
            description: Some("NeedleX notes".into()),
            ..new_prompt("Second", "plain body")
        },
    )
    .await
    .unwrap();
    prompts::create(&store, &new_prompt("Third", "nothing here"))
        .await
        .unwrap();

    let filter = PromptFilter {
        search: Some(" needlex ".into()),
        ..Default::default()
    };
    let hits = query::list_prompts(&store, &filter).await.unwrap();
    let ids: Vec<_> = hits.iter().map(|p| p.prompt.id).collect();
    assert_eq!(ids, [in_description.prompt.id, in_content.prompt.id]);
}

#[tokio::test]
async fn deleted_prompt_takes_its_history_along() {
    let store = MemoryStore::new();
    let id = prompts::create(&store, &new_prompt("t", "v1")).await.unwrap().prompt.id;
    let update = UpdatePrompt {
        content: Some("v2".into()),
        ..Default::default()
    };
    prompts::update(&store, id, &update).await.unwrap();

    prompts::delete(&store, id).await.unwrap();

    assert_matches!(
        prompts::get(&store, id).await,
        Err(LibraryError::Core(CoreError::NotFound { .. }))
    );
    assert_eq!(store.count_versions(id).await.unwrap(), 0);
}
