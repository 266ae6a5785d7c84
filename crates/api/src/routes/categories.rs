use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Category routes -- mounted at `/categories`. Read-only.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(categories::list_categories))
}
