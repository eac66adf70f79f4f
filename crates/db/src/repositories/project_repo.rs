//! Repository for the `projects` table.

use chrono::{Duration, Utc};
use sqlx::SqliteConnection;

use newsletter_core::ids::new_project_id;
use newsletter_core::types::Timestamp;

use crate::models::project::{CreateProject, Project, ProjectRow, UpdateProject};
use crate::repositories::TemplateRepo;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, owner, status, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// List every project with its templates, most recently updated first.
    ///
    /// Projects and templates are read in one transaction so the template
    /// lists match the project rows.
    pub async fn list(pool: &DbPool) -> Result<Vec<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY updated_at DESC, id ASC");
        let rows = sqlx::query_as::<_, ProjectRow>(&query)
            .fetch_all(&mut *tx)
            .await?;
        let mut templates = TemplateRepo::list_grouped(&mut tx).await?;

        tx.commit().await?;

        rows.into_iter()
            .map(|row| {
                let children = templates.remove(&row.id).unwrap_or_default();
                Project::hydrate(row, children)
            })
            .collect()
    }

    /// Find a project by id, with its templates.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let project = Self::find_in(&mut tx, id).await?;
        tx.commit().await?;
        Ok(project)
    }

    /// Insert a new project, returning it with an empty template list.
    ///
    /// If `status` is `None` in the input, defaults to `active`.
    pub async fn create(pool: &DbPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (id, name, owner, status, updated_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(new_project_id())
            .bind(&input.name)
            .bind(&input.owner)
            .bind(input.status.unwrap_or_default().as_str())
            .bind(Utc::now())
            .fetch_one(pool)
            .await?;
        Project::hydrate(row, Vec::new())
    }

    /// Update a project. Only non-`None` fields in `input` are applied;
    /// `updated_at` is always refreshed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: &str,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if Self::touch(&mut tx, id).await?.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "UPDATE projects SET
                name = COALESCE(?, name),
                owner = COALESCE(?, owner),
                status = COALESCE(?, status)
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(&input.name)
            .bind(&input.owner)
            .bind(input.status.map(|s| s.as_str()))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        let templates = TemplateRepo::list_for_project(&mut tx, id).await?;
        tx.commit().await?;
        Project::hydrate(row, templates).map(Some)
    }

    /// Delete a project. Its templates are removed by the foreign-key cascade
    /// in the same statement. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of stored projects.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await
    }

    pub(crate) async fn find_in(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ?");
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        match row {
            Some(row) => {
                let templates = TemplateRepo::list_for_project(conn, id).await?;
                Project::hydrate(row, templates).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Stamp a project as just modified. Returns the new `updated_at`, or
    /// `None` if the project does not exist.
    ///
    /// Run this first inside a child-mutation transaction. The first statement
    /// is a write, so it takes the database write lock: a concurrent cascade
    /// delete either commits before it (and this returns `None`) or waits until
    /// this transaction commits. The timestamp is read only once the lock is
    /// held and is always later than the stored one, so `updated_at` never
    /// moves backwards under concurrent writers.
    pub(crate) async fn touch(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        let previous: Option<Timestamp> = sqlx::query_scalar(
            "UPDATE projects SET updated_at = updated_at WHERE id = ? RETURNING updated_at",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(previous) = previous else {
            return Ok(None);
        };

        let at = next_timestamp(previous);
        sqlx::query("UPDATE projects SET updated_at = ? WHERE id = ?")
            .bind(at)
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(Some(at))
    }
}

/// The current time, or one nanosecond past `previous` if the clock has not
/// moved beyond it.
pub(crate) fn next_timestamp(previous: Timestamp) -> Timestamp {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::nanoseconds(1)
    }
}
