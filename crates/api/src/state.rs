use std::sync::Arc;

use crate::auth::session::SessionProvider;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: newsletter_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Issues the session returned by `GET /auth/session`.
    pub sessions: Arc<dyn SessionProvider>,
}
