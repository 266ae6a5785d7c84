use std::sync::Arc;

use promptdir_db::store::PromptStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend, Postgres or in-memory.
    pub store: Arc<dyn PromptStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
