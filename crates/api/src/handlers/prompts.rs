//! Handlers for prompts: filtered listing, CRUD, favorite toggle and
//! version history.
//!
//! Titles and content are trimmed here before reaching the library, which
//! rejects blank values.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use promptdir_core::mutation::Mutation;
use promptdir_core::types::DbId;
use promptdir_db::models::prompt::{CreatePrompt, PromptFilter, UpdatePrompt};
use promptdir_library::{prompts, query};

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, MutationResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Filters accepted by `GET /prompts`.
#[derive(Debug, Default, Deserialize)]
pub struct PromptListParams {
    pub search: Option<String>,
    pub category_id: Option<DbId>,
    /// Comma-separated tag IDs, e.g. `3,7`.
    pub tag_ids: Option<String>,
    pub favorites_only: Option<bool>,
}

impl PromptListParams {
    fn into_filter(self) -> AppResult<PromptFilter> {
        Ok(PromptFilter {
            tag_ids: parse_id_list(self.tag_ids.as_deref())?,
            search: self.search,
            category_id: self.category_id,
            favorites_only: self.favorites_only.unwrap_or(false),
        })
    }
}

/// Parse a comma-separated ID list, ignoring empty segments.
fn parse_id_list(raw: Option<&str>) -> AppResult<Vec<DbId>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<DbId>()
                .map_err(|_| AppError::BadRequest(format!("Invalid tag id '{s}'")))
        })
        .collect()
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

// ---------------------------------------------------------------------------
// GET /prompts
// ---------------------------------------------------------------------------

/// List prompts matching the filters, most recently updated first.
pub async fn list_prompts(
    State(state): State<AppState>,
    Query(params): Query<PromptListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.into_filter()?;
    let prompts = query::list_prompts(state.store.as_ref(), &filter).await?;

    Ok(Json(DataResponse { data: prompts }))
}

// ---------------------------------------------------------------------------
// POST /prompts
// ---------------------------------------------------------------------------

/// Create a prompt with its initial tags.
pub async fn create_prompt(
    State(state): State<AppState>,
    Json(mut input): Json<CreatePrompt>,
) -> AppResult<impl IntoResponse> {
    trim_in_place(&mut input.title);
    trim_in_place(&mut input.content);

    let prompt = prompts::create(state.store.as_ref(), &input)
        .await
        .map_err(AppError::failed(Mutation::Create))?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            data: prompt,
            message: Mutation::Create.success_message(),
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /prompts/{id}
// ---------------------------------------------------------------------------

pub async fn get_prompt(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let prompt = prompts::get(state.store.as_ref(), id).await?;

    Ok(Json(DataResponse { data: prompt }))
}

// ---------------------------------------------------------------------------
// PUT /prompts/{id}
// ---------------------------------------------------------------------------

/// Partially update a prompt. A title or content change snapshots the
/// previous values into the version history first.
pub async fn update_prompt(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdatePrompt>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = input.title.as_mut() {
        trim_in_place(title);
    }
    if let Some(content) = input.content.as_mut() {
        trim_in_place(content);
    }

    let prompt = prompts::update(state.store.as_ref(), id, &input)
        .await
        .map_err(AppError::failed(Mutation::Update))?;

    Ok(Json(MutationResponse {
        data: prompt,
        message: Mutation::Update.success_message(),
    }))
}

// ---------------------------------------------------------------------------
// DELETE /prompts/{id}
// ---------------------------------------------------------------------------

pub async fn delete_prompt(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    prompts::delete(state.store.as_ref(), id)
        .await
        .map_err(AppError::failed(Mutation::Delete))?;

    Ok(Json(MutationResponse {
        data: (),
        message: Mutation::Delete.success_message(),
    }))
}

// ---------------------------------------------------------------------------
// POST /prompts/{id}/favorite
// ---------------------------------------------------------------------------

/// Flip the favorite flag. The message reflects the new value.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let prompt = prompts::toggle_favorite(state.store.as_ref(), id)
        .await
        .map_err(AppError::failed(Mutation::ToggleFavorite))?;

    let message = Mutation::favorite_message(prompt.prompt.is_favorite);
    Ok(Json(MutationResponse {
        data: prompt,
        message,
    }))
}

// ---------------------------------------------------------------------------
// GET /prompts/{id}/versions
// ---------------------------------------------------------------------------

/// Version history, newest first.
pub async fn list_versions(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let versions = prompts::versions(state.store.as_ref(), id).await?;

    tracing::debug!(prompt_id = id, count = versions.len(), "Listed prompt versions");

    Ok(Json(DataResponse { data: versions }))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn id_list_skips_blanks() {
        assert_eq!(parse_id_list(Some("3, 7,,")).unwrap(), vec![3, 7]);
        assert!(parse_id_list(Some("")).unwrap().is_empty());
        assert!(parse_id_list(None).unwrap().is_empty());
    }

    #[test]
    fn id_list_rejects_non_numbers() {
        assert_matches!(parse_id_list(Some("1,abc")), Err(AppError::BadRequest(_)));
    }

    #[test]
    fn favorites_only_defaults_to_false() {
        let filter = PromptListParams::default().into_filter().unwrap();
        assert!(!filter.favorites_only);
        assert!(filter.tag_ids.is_empty());
    }

    #[test]
    fn trimming_leaves_inner_whitespace() {
        let mut value = "  Review {{diff}} \n".to_string();
        trim_in_place(&mut value);
        assert_eq!(value, "Review {{diff}}");
    }
}
