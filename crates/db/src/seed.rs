//! One-shot seed loader.
//!
//! At startup the service may import a JSON document of projects (each with
//! nested templates). The import only runs against an empty `projects` table
//! and is applied in a single transaction.

use std::path::Path;

use chrono::Utc;
use serde::Deserialize;

use newsletter_core::status::{ProjectStatus, TemplateStatus};
use newsletter_core::types::{EntityId, Timestamp, DEFAULT_TEMPLATE_VERSION};

use crate::DbPool;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One project entry of the seed document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedProject {
    pub id: EntityId,
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub status: ProjectStatus,
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub templates: Vec<SeedTemplate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedTemplate {
    pub id: EntityId,
    pub name: String,
    pub version: Option<String>,
    #[serde(default)]
    pub status: TemplateStatus,
    pub updated_at: Option<Timestamp>,
}

/// Load `path` into an empty database. Returns the number of projects
/// inserted; a missing file or a non-empty table yields `0`.
pub async fn seed_from_json(pool: &DbPool, path: &Path) -> Result<usize, SeedError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No seed file, skipping");
            return Ok(0);
        }
        Err(e) => return Err(e.into()),
    };

    let projects: Vec<SeedProject> = serde_json::from_str(&raw)?;
    Ok(seed_projects(pool, &projects).await?)
}

/// Insert `projects` and their templates if the `projects` table is empty.
///
/// Rows whose id already exists are skipped.
pub async fn seed_projects(pool: &DbPool, projects: &[SeedProject]) -> Result<usize, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        tracing::debug!(existing, "Projects table not empty, skipping seed");
        return Ok(0);
    }

    let mut inserted = 0;
    for project in projects {
        let result = sqlx::query(
            "INSERT INTO projects (id, name, owner, status, updated_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(&project.id)
        .bind(&project.name)
        .bind(&project.owner)
        .bind(project.status.as_str())
        .bind(project.updated_at.unwrap_or_else(Utc::now))
        .execute(&mut *tx)
        .await?;
        inserted += result.rows_affected() as usize;

        for template in &project.templates {
            sqlx::query(
                "INSERT INTO templates (id, project_id, name, version, status, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?)
                 ON CONFLICT (id) DO NOTHING",
            )
            .bind(&template.id)
            .bind(&project.id)
            .bind(&template.name)
            .bind(template.version.as_deref().unwrap_or(DEFAULT_TEMPLATE_VERSION))
            .bind(template.status.as_str())
            .bind(template.updated_at.unwrap_or_else(Utc::now))
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    tracing::info!(inserted, "Seeded projects");
    Ok(inserted)
}
