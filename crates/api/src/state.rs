use std::sync::Arc;

use fairshare_db::GroupStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Group persistence. Postgres in production, in-memory in tests.
    pub groups: Arc<dyn GroupStore>,
    pub config: Arc<ServerConfig>,
}
