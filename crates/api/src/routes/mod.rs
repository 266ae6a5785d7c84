pub mod categories;
pub mod health;
pub mod prompts;
pub mod tags;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /prompts                    list (filters), create
/// /prompts/{id}               get, update, delete
/// /prompts/{id}/favorite      toggle favorite (POST)
/// /prompts/{id}/versions      version history (GET)
///
/// /categories                 list
///
/// /tags                       list, create
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/prompts", prompts::router())
        .nest("/categories", categories::router())
        .nest("/tags", tags::router())
}
