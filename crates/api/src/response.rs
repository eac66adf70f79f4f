//! Shared response payloads for API handlers.

use serde::Serialize;

use newsletter_core::access::Capabilities;

use crate::auth::session::Session;

/// Body returned by successful deletes.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

/// Body of `GET /auth/session`: the session plus the controls its roles
/// unlock.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub session: Session,
    pub capabilities: Capabilities,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        let capabilities = Capabilities::for_roles(&session.roles);
        Self {
            session,
            capabilities,
        }
    }
}
