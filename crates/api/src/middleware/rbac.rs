//! Role-based access control (RBAC) guard.
//!
//! Every routed request passes through [`enforce_route_policy`], which looks
//! up the matched route in [`ROUTE_POLICIES`](crate::routes::ROUTE_POLICIES)
//! and checks the caller's claimed roles against that operation's required
//! roles. Denied requests never reach a handler, so no store write happens.

use std::convert::Infallible;
use std::fmt;

use axum::extract::{FromRequestParts, MatchedPath, Request};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use newsletter_core::access::Operation;
use newsletter_core::error::CoreError;
use newsletter_core::roles::{parse_role_claims, Role, RoleSet};

use crate::error::AppError;
use crate::routes::operation_for;

/// Header carrying the caller's comma-separated role claim.
pub const ROLES_HEADER: &str = "x-user-roles";

/// Roles the caller claims for this request. Absent header means none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimedRoles(pub RoleSet);

impl ClaimedRoles {
    /// Parse every `x-user-roles` header value. Values that are not valid
    /// UTF-8 contribute nothing.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let values = headers
            .get_all(ROLES_HEADER)
            .iter()
            .filter_map(|value| value.to_str().ok());
        ClaimedRoles(parse_role_claims(values))
    }
}

impl fmt::Display for ClaimedRoles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_roles(self.0.iter().copied()))
    }
}

/// Available to handlers behind the guard. Falls back to parsing the header
/// when the guard did not run.
impl<S: Send + Sync> FromRequestParts<S> for ClaimedRoles {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(claimed) = parts.extensions.get::<ClaimedRoles>() {
            return Ok(claimed.clone());
        }
        Ok(ClaimedRoles::from_headers(&parts.headers))
    }
}

/// Route-level guard. Install with `Router::route_layer` so the matched path
/// is known.
///
/// A matched route without a policy entry is denied.
pub async fn enforce_route_policy(mut req: Request, next: Next) -> Result<Response, AppError> {
    let claimed = ClaimedRoles::from_headers(req.headers());
    let matched = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned());

    let Some(operation) = matched
        .as_deref()
        .and_then(|path| operation_for(req.method(), path))
    else {
        tracing::warn!(
            method = %req.method(),
            path = ?matched,
            "No access policy for route, denying"
        );
        return Err(AppError::Core(CoreError::Forbidden(
            "No access policy for this route".into(),
        )));
    };

    if !operation.permits(&claimed.0) {
        tracing::warn!(%operation, claimed = %claimed, "Access denied");
        return Err(AppError::Core(CoreError::Forbidden(denial_message(
            operation,
        ))));
    }

    req.extensions_mut().insert(claimed);
    Ok(next.run(req).await)
}

fn denial_message(operation: Operation) -> String {
    format!(
        "{operation} requires one of the roles: {}",
        join_roles(operation.required_roles().iter().copied())
    )
}

fn join_roles(roles: impl Iterator<Item = Role>) -> String {
    roles.map(Role::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn absent_header_claims_nothing() {
        assert_eq!(ClaimedRoles::from_headers(&HeaderMap::new()), ClaimedRoles::default());
    }

    #[test]
    fn repeated_headers_are_merged() {
        let mut headers = HeaderMap::new();
        headers.append(ROLES_HEADER, HeaderValue::from_static("analyst"));
        headers.append(ROLES_HEADER, HeaderValue::from_static(" editor ,"));

        let claimed = ClaimedRoles::from_headers(&headers);
        assert_eq!(claimed.0, RoleSet::from([Role::Editor, Role::Analyst]));
        assert_eq!(claimed.to_string(), "editor, analyst");
    }

    #[test]
    fn denial_message_names_required_roles() {
        assert_eq!(
            denial_message(Operation::CreateProject),
            "create_project requires one of the roles: admin, editor"
        );
        assert_eq!(
            denial_message(Operation::DeleteTemplate),
            "delete_template requires one of the roles: admin"
        );
    }
}
