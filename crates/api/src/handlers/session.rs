//! Handler for `/auth/session`.

use axum::extract::State;
use axum::Json;

use crate::response::SessionResponse;
use crate::state::AppState;

/// GET /auth/session
pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(state.sessions.session().into())
}
