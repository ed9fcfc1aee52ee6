use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. The only state shared across requests.
    pub pool: popdash_db::DbPool,
    /// Server configuration (window default read by handlers).
    pub config: Arc<ServerConfig>,
}
