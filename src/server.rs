//!
//! tasklane HTTP server
//! --------------------
//! Axum-based HTTP/JSON surface over the operation layer.
//!
//! Responsibilities:
//! - Bearer-token resolution into a per-request context before any
//!   identity-requiring handler body runs.
//! - Register/login endpoints backed by the identity directory.
//! - Project and task CRUD endpoints delegating to the `Api` dispatcher.
//! - Uniform error-to-status mapping from the `AppError` taxonomy.

use std::net::SocketAddr;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::api::Api;
use crate::config::Config;
use crate::error::AppError;
use crate::identity::{self, RequestContext};
use crate::records::{AuthInput, ProjectInput, RegisterInput, TaskInput, TaskUpdateInput};
use crate::storage::SharedStore;

/// Shared server state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub api: Api,
}

/// Start the HTTP server with the given configuration.
pub async fn run_with_config(config: Config) -> anyhow::Result<()> {
    let store = SharedStore::new(&config.data_root)?;
    info!(
        target: "tasklane",
        "store opened at '{}': users={}, projects={}, tasks={}",
        config.data_root,
        store.users.len(),
        store.projects.len(),
        store.tasks.len()
    );

    let http_port = config.http_port;
    let app_state = AppState { api: Api::new(store, config) };
    let app = router(app_state);

    let addr: SocketAddr = format!("0.0.0.0:{}", http_port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Convenience entry point resolving configuration from the environment.
pub async fn run() -> anyhow::Result<()> {
    run_with_config(Config::from_env()).await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "tasklane ok" }))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{id}", put(update_project).delete(delete_project))
        .route("/projects/{id}/tasks", get(list_tasks))
        .route("/tasks", post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .with_state(state)
}

/// Resolve the bearer credential (if any) into a request context. A missing
/// or unverifiable token yields an anonymous context, which every
/// identity-requiring operation rejects before touching the guard.
fn context_from_headers(state: &AppState, headers: &HeaderMap) -> RequestContext {
    let Some(raw) = headers.get("authorization").and_then(|v| v.to_str().ok()) else {
        return RequestContext::anonymous();
    };
    let token = raw.trim_start_matches("Bearer ").trim();
    match identity::principal_for_token(&state.api.config, token) {
        Some(principal) => RequestContext::for_principal(principal),
        None => RequestContext::anonymous(),
    }
}

fn ok_json<T: Serialize>(value: T) -> Response {
    (StatusCode::OK, Json(value)).into_response()
}

fn err_json(err: &AppError) -> Response {
    if err.http_status() >= 500 {
        error!("request failed: {}", err);
    }
    let status = StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "status": "error", "code": err.code_str(), "error": err.message() }))).into_response()
}

async fn register(State(state): State<AppState>, Json(payload): Json<RegisterInput>) -> Response {
    match state.api.register(&payload) {
        Ok(message) => ok_json(json!({ "message": message })),
        Err(e) => err_json(&e),
    }
}

async fn login(State(state): State<AppState>, Json(payload): Json<AuthInput>) -> Response {
    match state.api.authenticate(&payload) {
        Ok(resp) => ok_json(resp),
        Err(e) => err_json(&e),
    }
}

async fn list_projects(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = context_from_headers(&state, &headers);
    match state.api.list_projects(&ctx) {
        Ok(projects) => ok_json(projects),
        Err(e) => err_json(&e),
    }
}

async fn create_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ProjectInput>,
) -> Response {
    let ctx = context_from_headers(&state, &headers);
    match state.api.create_project(&ctx, &payload) {
        Ok(project) => ok_json(project),
        Err(e) => err_json(&e),
    }
}

async fn update_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<ProjectInput>,
) -> Response {
    let ctx = context_from_headers(&state, &headers);
    match state.api.update_project(&ctx, &id, &payload) {
        Ok(project) => ok_json(project),
        Err(e) => err_json(&e),
    }
}

async fn delete_project(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    let ctx = context_from_headers(&state, &headers);
    match state.api.delete_project(&ctx, &id) {
        Ok(message) => ok_json(json!({ "message": message })),
        Err(e) => err_json(&e),
    }
}

async fn list_tasks(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    let ctx = context_from_headers(&state, &headers);
    match state.api.list_tasks(&ctx, &id) {
        Ok(tasks) => ok_json(tasks),
        Err(e) => err_json(&e),
    }
}

async fn create_task(State(state): State<AppState>, headers: HeaderMap, Json(payload): Json<TaskInput>) -> Response {
    let ctx = context_from_headers(&state, &headers);
    match state.api.create_task(&ctx, &payload) {
        Ok(task) => ok_json(task),
        Err(e) => err_json(&e),
    }
}

async fn update_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<TaskUpdateInput>,
) -> Response {
    let ctx = context_from_headers(&state, &headers);
    match state.api.update_task(&ctx, &id, &payload) {
        Ok(task) => ok_json(task),
        Err(e) => err_json(&e),
    }
}

async fn delete_task(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    let ctx = context_from_headers(&state, &headers);
    match state.api.delete_task(&ctx, &id) {
        Ok(message) => ok_json(json!({ "message": message })),
        Err(e) => err_json(&e),
    }
}
