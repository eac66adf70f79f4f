//! Repository for the `templates` table.
//!
//! Templates are always addressed through their parent project: every lookup
//! filters on both `id` and `project_id`, so a template id that exists under a
//! different project is reported as missing.

use std::collections::HashMap;

use sqlx::SqliteConnection;

use newsletter_core::ids::new_template_id;
use newsletter_core::types::{EntityId, DEFAULT_TEMPLATE_VERSION};

use crate::models::template::{CreateTemplate, Template, TemplateRow, UpdateTemplate};
use crate::repositories::ProjectRepo;
use crate::DbPool;

const COLUMNS: &str = "id, project_id, name, version, status, updated_at";

/// Outcome of a write addressed to a template inside a project.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateWrite<T> {
    /// The write was applied and the parent project touched.
    Done(T),
    /// No project with the given id exists. Nothing was written.
    ProjectNotFound,
    /// The project exists but has no template with the given id. Nothing was
    /// written.
    TemplateNotFound,
}

/// Provides CRUD operations for templates.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Find a template by id within a project.
    pub async fn find_in_project(
        pool: &DbPool,
        project_id: &str,
        template_id: &str,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE id = ? AND project_id = ?");
        sqlx::query_as::<_, TemplateRow>(&query)
            .bind(template_id)
            .bind(project_id)
            .fetch_optional(pool)
            .await?
            .map(Template::try_from)
            .transpose()
    }

    /// Add a template to a project and touch the project.
    ///
    /// `version` defaults to `0.1.0` and `status` to `draft`.
    pub async fn create(
        pool: &DbPool,
        project_id: &str,
        input: &CreateTemplate,
    ) -> Result<TemplateWrite<Template>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(now) = ProjectRepo::touch(&mut tx, project_id).await? else {
            tx.rollback().await?;
            return Ok(TemplateWrite::ProjectNotFound);
        };

        let query = format!(
            "INSERT INTO templates (id, project_id, name, version, status, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, TemplateRow>(&query)
            .bind(new_template_id())
            .bind(project_id)
            .bind(&input.name)
            .bind(input.version.as_deref().unwrap_or(DEFAULT_TEMPLATE_VERSION))
            .bind(input.status.unwrap_or_default().as_str())
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Template::try_from(row).map(TemplateWrite::Done)
    }

    /// Update a template. Only non-`None` fields are applied; the template's
    /// and the project's `updated_at` are both refreshed.
    pub async fn update(
        pool: &DbPool,
        project_id: &str,
        template_id: &str,
        input: &UpdateTemplate,
    ) -> Result<TemplateWrite<Template>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(now) = ProjectRepo::touch(&mut tx, project_id).await? else {
            tx.rollback().await?;
            return Ok(TemplateWrite::ProjectNotFound);
        };

        let query = format!(
            "UPDATE templates SET
                name = COALESCE(?, name),
                version = COALESCE(?, version),
                status = COALESCE(?, status),
                updated_at = ?
             WHERE id = ? AND project_id = ?
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, TemplateRow>(&query)
            .bind(&input.name)
            .bind(&input.version)
            .bind(input.status.map(|s| s.as_str()))
            .bind(now)
            .bind(template_id)
            .bind(project_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(TemplateWrite::TemplateNotFound);
        };

        tx.commit().await?;
        Template::try_from(row).map(TemplateWrite::Done)
    }

    /// Delete a template from a project and touch the project.
    pub async fn delete(
        pool: &DbPool,
        project_id: &str,
        template_id: &str,
    ) -> Result<TemplateWrite<()>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if ProjectRepo::touch(&mut tx, project_id).await?.is_none() {
            tx.rollback().await?;
            return Ok(TemplateWrite::ProjectNotFound);
        }

        let result = sqlx::query("DELETE FROM templates WHERE id = ? AND project_id = ?")
            .bind(template_id)
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(TemplateWrite::TemplateNotFound);
        }

        tx.commit().await?;
        Ok(TemplateWrite::Done(()))
    }

    /// Templates of one project, most recently updated first.
    pub(crate) async fn list_for_project(
        conn: &mut SqliteConnection,
        project_id: &str,
    ) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM templates WHERE project_id = ? \
             ORDER BY updated_at DESC, id ASC"
        );
        sqlx::query_as::<_, TemplateRow>(&query)
            .bind(project_id)
            .fetch_all(&mut *conn)
            .await?
            .into_iter()
            .map(Template::try_from)
            .collect()
    }

    /// All templates grouped by project, each group most recently updated first.
    pub(crate) async fn list_grouped(
        conn: &mut SqliteConnection,
    ) -> Result<HashMap<EntityId, Vec<Template>>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates ORDER BY updated_at DESC, id ASC");
        let rows = sqlx::query_as::<_, TemplateRow>(&query)
            .fetch_all(&mut *conn)
            .await?;

        let mut grouped: HashMap<EntityId, Vec<Template>> = HashMap::new();
        for row in rows {
            let template = Template::try_from(row)?;
            grouped
                .entry(template.project_id.clone())
                .or_default()
                .push(template);
        }
        Ok(grouped)
    }
}
