//! Route definitions for prompts.
//!
//! ```text
//! GET    /                    list_prompts
//! POST   /                    create_prompt
//! GET    /{id}                get_prompt
//! PUT    /{id}                update_prompt
//! DELETE /{id}                delete_prompt
//! POST   /{id}/favorite       toggle_favorite
//! GET    /{id}/versions       list_versions
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::prompts;
use crate::state::AppState;

/// Prompt routes -- mounted at `/prompts`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(prompts::list_prompts).post(prompts::create_prompt))
        .route(
            "/{id}",
            get(prompts::get_prompt)
                .put(prompts::update_prompt)
                .delete(prompts::delete_prompt),
        )
        .route("/{id}/favorite", post(prompts::toggle_favorite))
        .route("/{id}/versions", get(prompts::list_versions))
}
