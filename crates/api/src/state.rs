use std::sync::Arc;

use bizdesk_db::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Storage backend; owns the process-wide connection pool.
    pub store: Arc<dyn Store>,
    /// Server configuration (read by the auth middleware).
    pub config: Arc<ServerConfig>,
}
