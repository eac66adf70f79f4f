#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use newsletter_api::auth::session::{FixtureSessionProvider, SessionConfig};
use newsletter_api::config::ServerConfig;
use newsletter_api::middleware::rbac::ROLES_HEADER;
use newsletter_api::router::build_app_router;
use newsletter_api::state::AppState;
use newsletter_db::DbPool;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        seed_path: "does-not-exist.json".into(),
        session: SessionConfig::default(),
    }
}

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

/// Build the full application router, with the same middleware stack as
/// `main.rs`, over the given pool.
pub fn build_test_app(pool: DbPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sessions: Arc::new(FixtureSessionProvider::new(config.session.clone())),
    };
    build_app_router(state, &config)
}

/// A fresh database plus the router over it. The pool is returned so tests
/// can inspect the store directly.
pub async fn test_app() -> (Router, DbPool) {
    let pool = test_pool().await;
    (build_test_app(pool.clone()), pool)
}

/// Send one request. `roles` becomes the `x-user-roles` header when given.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    roles: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(roles) = roles {
        builder = builder.header(ROLES_HEADER, roles);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: &Router, uri: &str, roles: Option<&str>, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, roles, Some(body)).await
}

pub async fn patch_json(
    app: &Router,
    uri: &str,
    roles: Option<&str>,
    body: Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, roles, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, roles: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, roles, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the parsed body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

/// Create a project as `admin` and return its JSON.
pub async fn create_project(app: &Router, name: &str) -> Value {
    let response = post_json(
        app,
        "/projects",
        Some("admin"),
        serde_json::json!({ "name": name, "owner": "Dana" }),
    )
    .await;
    expect_json(response, StatusCode::CREATED).await
}

/// Add a template as `admin` and return its JSON.
pub async fn add_template(app: &Router, project_id: &str, name: &str) -> Value {
    let response = post_json(
        app,
        &format!("/projects/{project_id}/templates"),
        Some("admin"),
        serde_json::json!({ "name": name }),
    )
    .await;
    expect_json(response, StatusCode::CREATED).await
}

/// Let the clock move so consecutive writes get distinct timestamps.
pub async fn tick() {
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
}
