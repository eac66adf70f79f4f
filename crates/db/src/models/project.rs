//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use newsletter_core::status::ProjectStatus;
use newsletter_core::types::{EntityId, Timestamp};
use newsletter_core::validation::not_blank;

use crate::models::template::Template;

/// A raw row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: EntityId,
    pub name: String,
    pub owner: String,
    pub status: String,
    pub updated_at: Timestamp,
}

/// A project together with its templates, most recently updated first.
///
/// `template_count` is only ever set from `templates.len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    pub owner: String,
    pub status: ProjectStatus,
    pub template_count: usize,
    pub updated_at: Timestamp,
    pub templates: Vec<Template>,
}

impl Project {
    pub fn hydrate(row: ProjectRow, templates: Vec<Template>) -> Result<Self, sqlx::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(Project {
            id: row.id,
            name: row.name,
            owner: row.owner,
            status,
            template_count: templates.len(),
            updated_at: row.updated_at,
            templates,
        })
    }
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateProject {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub owner: String,
    /// Defaults to `active` if omitted.
    pub status: Option<ProjectStatus>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub owner: Option<String>,
    pub status: Option<ProjectStatus>,
}
