use std::sync::Arc;

use crate::config::ServerConfig;
use crate::session::SessionStore;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: annotator_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Live annotation sessions keyed by principal.
    pub sessions: SessionStore,
}
