//! Route definitions for `/auth`.

use axum::routing::get;
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// ```text
/// GET    /auth/session                      -> get_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/auth/session", get(session::get_session))
}
