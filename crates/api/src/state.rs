use std::sync::Arc;

use cinema_events::MovieNotifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cinema_db::DbPool,
    /// Server configuration (JWT settings, client URL).
    pub config: Arc<ServerConfig>,
    /// Channel used to announce published movies.
    pub notifier: Arc<dyn MovieNotifier>,
}
