pub mod auth;
pub mod health;
pub mod project;

use axum::http::Method;
use axum::Router;

use newsletter_core::access::Operation;

use crate::middleware::rbac::enforce_route_policy;
use crate::state::AppState;

/// Access policy per route: `(method, matched path, operation)`.
///
/// The guard resolves the operation here and checks
/// [`Operation::required_roles`]. Every route mounted by [`api_routes`]
/// must appear in this table; unlisted routes are denied.
pub const ROUTE_POLICIES: &[(&str, &str, Operation)] = &[
    ("GET", "/auth/session", Operation::GetSession),
    ("GET", "/projects", Operation::ListProjects),
    ("POST", "/projects", Operation::CreateProject),
    ("GET", "/projects/{project_id}", Operation::GetProject),
    ("PATCH", "/projects/{project_id}", Operation::UpdateProject),
    ("DELETE", "/projects/{project_id}", Operation::DeleteProject),
    ("GET", "/projects/{project_id}/templates", Operation::ListTemplates),
    ("POST", "/projects/{project_id}/templates", Operation::CreateTemplate),
    (
        "GET",
        "/projects/{project_id}/templates/{template_id}",
        Operation::GetTemplate,
    ),
    (
        "PATCH",
        "/projects/{project_id}/templates/{template_id}",
        Operation::UpdateTemplate,
    ),
    (
        "DELETE",
        "/projects/{project_id}/templates/{template_id}",
        Operation::DeleteTemplate,
    ),
];

/// Resolve the operation for a method and matched route path.
pub fn operation_for(method: &Method, path: &str) -> Option<Operation> {
    ROUTE_POLICIES
        .iter()
        .find(|(m, p, _)| *m == method.as_str() && *p == path)
        .map(|(_, _, operation)| *operation)
}

/// Build the guarded route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/session                                   session (public)
///
/// /projects                                       list (public), create [admin|editor]
/// /projects/{project_id}                          get (public), update [admin|editor], delete [admin]
/// /projects/{project_id}/templates                list (public), create [admin|editor]
/// /projects/{project_id}/templates/{template_id}  get (public), update [admin|editor], delete [admin]
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(project::router())
        .route_layer(axum::middleware::from_fn(enforce_route_policy))
}
