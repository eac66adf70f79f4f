//! Handlers for templates nested under `/projects/{project_id}/templates`.
//!
//! A template is only reachable through the project that owns it. Every write
//! also touches the project, so the repository reports which of the two ids
//! was missing.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use newsletter_core::error::CoreError;
use newsletter_core::types::EntityId;
use newsletter_db::models::template::{CreateTemplate, Template, UpdateTemplate};
use newsletter_db::repositories::{ProjectRepo, TemplateRepo, TemplateWrite};

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::rbac::ClaimedRoles;
use crate::response::DeletedResponse;
use crate::state::AppState;

/// Turn a repository outcome into the value or the matching 404.
fn resolve<T>(outcome: TemplateWrite<T>, project_id: &str, template_id: &str) -> AppResult<T> {
    match outcome {
        TemplateWrite::Done(value) => Ok(value),
        TemplateWrite::ProjectNotFound => Err(CoreError::project_not_found(project_id).into()),
        TemplateWrite::TemplateNotFound => Err(CoreError::template_not_found(template_id).into()),
    }
}

/// GET /projects/{project_id}/templates
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<EntityId>,
) -> AppResult<Json<Vec<Template>>> {
    let project = ProjectRepo::find_by_id(&state.pool, &project_id)
        .await?
        .ok_or_else(|| CoreError::project_not_found(&project_id))?;
    Ok(Json(project.templates))
}

/// GET /projects/{project_id}/templates/{template_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((project_id, template_id)): Path<(EntityId, EntityId)>,
) -> AppResult<Json<Template>> {
    if let Some(template) =
        TemplateRepo::find_in_project(&state.pool, &project_id, &template_id).await?
    {
        return Ok(Json(template));
    }

    // Distinguish a missing project from a template that lives elsewhere.
    if ProjectRepo::find_by_id(&state.pool, &project_id)
        .await?
        .is_none()
    {
        return Err(CoreError::project_not_found(&project_id).into());
    }
    Err(CoreError::template_not_found(&template_id).into())
}

/// POST /projects/{project_id}/templates
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<EntityId>,
    roles: ClaimedRoles,
    ValidatedJson(input): ValidatedJson<CreateTemplate>,
) -> AppResult<(StatusCode, Json<Template>)> {
    let outcome = TemplateRepo::create(&state.pool, &project_id, &input).await?;
    let template = match outcome {
        TemplateWrite::Done(template) => template,
        TemplateWrite::ProjectNotFound | TemplateWrite::TemplateNotFound => {
            return Err(CoreError::project_not_found(&project_id).into());
        }
    };

    tracing::info!(
        project_id = %project_id,
        template_id = %template.id,
        roles = %roles,
        "Template created",
    );

    Ok((StatusCode::CREATED, Json(template)))
}

/// PATCH /projects/{project_id}/templates/{template_id}
pub async fn update(
    State(state): State<AppState>,
    Path((project_id, template_id)): Path<(EntityId, EntityId)>,
    roles: ClaimedRoles,
    ValidatedJson(input): ValidatedJson<UpdateTemplate>,
) -> AppResult<Json<Template>> {
    let outcome = TemplateRepo::update(&state.pool, &project_id, &template_id, &input).await?;
    let template = resolve(outcome, &project_id, &template_id)?;

    tracing::info!(
        project_id = %project_id,
        template_id = %template_id,
        roles = %roles,
        "Template updated",
    );

    Ok(Json(template))
}

/// DELETE /projects/{project_id}/templates/{template_id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, template_id)): Path<(EntityId, EntityId)>,
    roles: ClaimedRoles,
) -> AppResult<Json<DeletedResponse>> {
    let outcome = TemplateRepo::delete(&state.pool, &project_id, &template_id).await?;
    resolve(outcome, &project_id, &template_id)?;

    tracing::info!(
        project_id = %project_id,
        template_id = %template_id,
        roles = %roles,
        "Template deleted",
    );

    Ok(Json(DeletedResponse { deleted: true }))
}
