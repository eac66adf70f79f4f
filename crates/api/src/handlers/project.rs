//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use newsletter_core::error::CoreError;
use newsletter_core::types::EntityId;
use newsletter_db::models::project::{CreateProject, Project, UpdateProject};
use newsletter_db::repositories::ProjectRepo;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::rbac::ClaimedRoles;
use crate::response::DeletedResponse;
use crate::state::AppState;

/// POST /projects
pub async fn create(
    State(state): State<AppState>,
    roles: ClaimedRoles,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = ProjectRepo::create(&state.pool, &input).await?;

    tracing::info!(project_id = %project.id, roles = %roles, "Project created");

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /projects/{project_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(project_id): Path<EntityId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, &project_id)
        .await?
        .ok_or_else(|| CoreError::project_not_found(&project_id))?;
    Ok(Json(project))
}

/// PATCH /projects/{project_id}
pub async fn update(
    State(state): State<AppState>,
    Path(project_id): Path<EntityId>,
    roles: ClaimedRoles,
    ValidatedJson(input): ValidatedJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::update(&state.pool, &project_id, &input)
        .await?
        .ok_or_else(|| CoreError::project_not_found(&project_id))?;

    tracing::info!(project_id = %project.id, roles = %roles, "Project updated");

    Ok(Json(project))
}

/// DELETE /projects/{project_id}
///
/// Templates are removed with the project. Deleting twice is a 404.
pub async fn delete(
    State(state): State<AppState>,
    Path(project_id): Path<EntityId>,
    roles: ClaimedRoles,
) -> AppResult<Json<DeletedResponse>> {
    if !ProjectRepo::delete(&state.pool, &project_id).await? {
        return Err(CoreError::project_not_found(&project_id).into());
    }

    tracing::info!(project_id = %project_id, roles = %roles, "Project deleted");

    Ok(Json(DeletedResponse { deleted: true }))
}
