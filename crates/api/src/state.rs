use std::sync::Arc;

use govai_jimeng::JimengApi;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: govai_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Generation API client (shares one connection pool across requests).
    pub jimeng: Arc<JimengApi>,
}
