use std::sync::Arc;

use cinedex_core::catalog::MovieCatalog;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Movie catalog service over the configured store.
    pub movies: MovieCatalog,
}
