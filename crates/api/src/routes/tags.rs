//! Route definitions for tags.
//!
//! ```text
//! GET    /                  list_tags
//! POST   /                  create_tag
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Tag routes -- mounted at `/tags`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(tags::list_tags).post(tags::create_tag))
}
