use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use promptdir_library::reference;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = reference::list_categories(state.store.as_ref()).await?;

    Ok(Json(DataResponse { data: categories }))
}
