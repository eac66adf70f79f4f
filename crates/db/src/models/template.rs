//! Template entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use newsletter_core::status::TemplateStatus;
use newsletter_core::types::{EntityId, Timestamp};
use newsletter_core::validation::not_blank;

/// A raw row from the `templates` table.
#[derive(Debug, Clone, FromRow)]
pub struct TemplateRow {
    pub id: EntityId,
    pub project_id: EntityId,
    pub name: String,
    pub version: String,
    pub status: String,
    pub updated_at: Timestamp,
}

/// A template as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: EntityId,
    pub project_id: EntityId,
    pub name: String,
    pub version: String,
    pub status: TemplateStatus,
    pub updated_at: Timestamp,
}

impl TryFrom<TemplateRow> for Template {
    type Error = sqlx::Error;

    fn try_from(row: TemplateRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(Template {
            id: row.id,
            project_id: row.project_id,
            name: row.name,
            version: row.version,
            status,
            updated_at: row.updated_at,
        })
    }
}

/// DTO for adding a template to a project.
///
/// A missing `name` deserializes as empty and is rejected by validation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateTemplate {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    /// Defaults to `0.1.0` if omitted.
    #[validate(custom(function = "not_blank"))]
    pub version: Option<String>,
    /// Defaults to `draft` if omitted.
    pub status: Option<TemplateStatus>,
}

/// DTO for updating a template. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTemplate {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub version: Option<String>,
    pub status: Option<TemplateStatus>,
}
