//! Route definitions for the `/projects` resource and its templates.

use axum::routing::get;
use axum::Router;

use crate::handlers::{project, template};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// Paths are written out in full (no nesting) so the matched path seen by
/// the access guard equals the key in `ROUTE_POLICIES`.
///
/// ```text
/// GET    /projects                                       -> list
/// POST   /projects                                       -> create
/// GET    /projects/{project_id}                          -> get_by_id
/// PATCH  /projects/{project_id}                          -> update
/// DELETE /projects/{project_id}                          -> delete
///
/// GET    /projects/{project_id}/templates                -> list_by_project
/// POST   /projects/{project_id}/templates                -> create
/// GET    /projects/{project_id}/templates/{template_id}  -> get_by_id
/// PATCH  /projects/{project_id}/templates/{template_id}  -> update
/// DELETE /projects/{project_id}/templates/{template_id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(project::list).post(project::create))
        .route(
            "/projects/{project_id}",
            get(project::get_by_id)
                .patch(project::update)
                .delete(project::delete),
        )
        .route(
            "/projects/{project_id}/templates",
            get(template::list_by_project).post(template::create),
        )
        .route(
            "/projects/{project_id}/templates/{template_id}",
            get(template::get_by_id)
                .patch(template::update)
                .delete(template::delete),
        )
}
