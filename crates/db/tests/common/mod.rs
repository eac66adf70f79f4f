#![allow(dead_code)]

use newsletter_db::models::project::{CreateProject, Project};
use newsletter_db::models::template::{CreateTemplate, Template};
use newsletter_db::repositories::{ProjectRepo, TemplateRepo, TemplateWrite};
use newsletter_db::DbPool;

/// Fresh in-memory database with migrations applied.
pub async fn test_pool() -> DbPool {
    let pool = newsletter_db::create_pool("sqlite::memory:")
        .await
        .expect("in-memory pool");
    newsletter_db::run_migrations(&pool)
        .await
        .expect("migrations");
    pool
}

/// File-backed database in a fresh temp directory, using the same
/// multi-connection WAL pool as production. Keep the `TempDir` alive for as
/// long as the pool is used.
pub async fn file_pool() -> (DbPool, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = format!("sqlite://{}", dir.path().join("newsletter.db").display());
    let pool = newsletter_db::create_pool(&url).await.expect("file pool");
    newsletter_db::run_migrations(&pool)
        .await
        .expect("migrations");
    (pool, dir)
}

pub fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        owner: "Dana".to_string(),
        status: None,
    }
}

pub fn new_template(name: &str) -> CreateTemplate {
    CreateTemplate {
        name: name.to_string(),
        version: None,
        status: None,
    }
}

pub async fn create_project(pool: &DbPool, name: &str) -> Project {
    ProjectRepo::create(pool, &new_project(name)).await.unwrap()
}

pub async fn add_template(pool: &DbPool, project_id: &str, name: &str) -> Template {
    match TemplateRepo::create(pool, project_id, &new_template(name))
        .await
        .unwrap()
    {
        TemplateWrite::Done(template) => template,
        other => panic!("expected template to be created, got {other:?}"),
    }
}

/// Let the clock move so consecutive writes get distinct timestamps.
pub async fn tick() {
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
}
