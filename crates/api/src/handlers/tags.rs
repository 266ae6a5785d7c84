//! Handlers for tags. Tags are global; their slug is derived from the name.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use promptdir_core::mutation::Mutation;
use promptdir_db::models::tag::CreateTag;
use promptdir_library::reference;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, MutationResponse};
use crate::state::AppState;

/// GET /api/v1/tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tags = reference::list_tags(state.store.as_ref()).await?;

    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/tags
///
/// A name whose slug already exists is rejected with 409.
pub async fn create_tag(
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<impl IntoResponse> {
    let tag = reference::create_tag(state.store.as_ref(), &input.name)
        .await
        .map_err(AppError::failed(Mutation::CreateTag))?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            data: tag,
            message: Mutation::CreateTag.success_message(),
        }),
    ))
}
