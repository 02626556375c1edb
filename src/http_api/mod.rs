use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    MaterialRequest, Project, Task, TaskStatus, TimelineEntry, User, UserRole, Workforce,
    workforce::WorkforceError,
};

#[derive(Clone)]
pub struct AppState {
    workforce: Arc<RwLock<Workforce>>,
}

impl AppState {
    pub fn new(workforce: Workforce) -> Self {
        Self {
            workforce: Arc::new(RwLock::new(workforce)),
        }
    }

    pub fn with_shared(workforce: Arc<RwLock<Workforce>>) -> Self {
        Self { workforce }
    }

    fn workforce(&self) -> Arc<RwLock<Workforce>> {
        self.workforce.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    Invalid(String),
}

impl ApiError {
    fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }
}

impl From<WorkforceError> for ApiError {
    fn from(value: WorkforceError) -> Self {
        match value {
            WorkforceError::UserNotFound(_)
            | WorkforceError::ProjectNotFound(_)
            | WorkforceError::TaskNotFound(_)
            | WorkforceError::MaterialNotFound(_) => ApiError::NotFound(value.to_string()),
            WorkforceError::ForbiddenTransition { .. } => ApiError::Forbidden(value.to_string()),
            WorkforceError::Invalid(_) => ApiError::Invalid(value.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(ErrorBody {
                    error: "not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Unauthorized(message) => {
                let body = Json(ErrorBody {
                    error: "unauthorized",
                    message,
                });
                (StatusCode::UNAUTHORIZED, body).into_response()
            }
            ApiError::Forbidden(message) => {
                let body = Json(ErrorBody {
                    error: "forbidden",
                    message,
                });
                (StatusCode::FORBIDDEN, body).into_response()
            }
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/state", get(get_state))
        .route("/login", post(login))
        .route("/users", post(create_user))
        .route("/users/:id", axum::routing::delete(delete_user))
        .route("/projects", post(create_project))
        .route(
            "/projects/:project_id",
            put(update_project).delete(delete_project),
        )
        .route("/projects/:project_id/tasks", post(add_task))
        .route(
            "/projects/:project_id/tasks/:task_id",
            put(update_task).delete(delete_task),
        )
        .route(
            "/projects/:project_id/tasks/:task_id/status",
            put(set_task_status),
        )
        .route("/cronograma", get(get_timeline))
        .route("/materials", post(create_material))
        .route("/materials/:id", put(update_material))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, workforce: Workforce) -> std::io::Result<()> {
    let state = AppState::new(workforce);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Full snapshot in one response: everything the client renders, with
/// passwords stripped and the averia/obra partitions and timeline derived
/// server-side.
#[derive(Debug, Serialize)]
struct StateResponse {
    users: Vec<User>,
    projects: Vec<Project>,
    materials: Vec<MaterialRequest>,
    averias: Vec<Project>,
    obras: Vec<Project>,
    tasks: Vec<Task>,
    cronograma: Vec<TimelineEntry>,
}

async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let workforce = state.workforce();
    let guard = workforce.read();
    let response = StateResponse {
        users: guard.users().iter().map(User::sanitized).collect(),
        projects: guard.projects().to_vec(),
        materials: guard.materials().to_vec(),
        averias: guard.averias().into_iter().cloned().collect(),
        obras: guard.obras().into_iter().cloned().collect(),
        tasks: guard.all_tasks().into_iter().cloned().collect(),
        cronograma: guard.timeline(),
    };
    Json(response)
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    username: String,
    #[serde(default)]
    password: String,
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<User>, ApiError> {
    if payload.username.trim().is_empty() {
        return Err(ApiError::Invalid("username is required".to_string()));
    }
    let workforce = state.workforce();
    let guard = workforce.read();
    guard
        .login(&payload.username, &payload.password)
        .map(|user| Json(user.sanitized()))
        .ok_or_else(|| ApiError::unauthorized("invalid credentials"))
}

async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let workforce = state.workforce();
    let created = {
        let mut guard = workforce.write();
        guard.add_user(user)?
    };
    Ok((StatusCode::CREATED, Json(created.sanitized())))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let workforce = state.workforce();
    let mut guard = workforce.write();
    guard.remove_user(&user_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_project(
    State(state): State<AppState>,
    Json(project): Json<Project>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let workforce = state.workforce();
    let created = {
        let mut guard = workforce.write();
        guard.create_project(project)?
    };
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(payload): Json<Project>,
) -> Result<Json<Project>, ApiError> {
    let workforce = state.workforce();
    let updated = {
        let mut guard = workforce.write();
        guard.update_project(&project_id, payload)?
    };
    Ok(Json(updated))
}

async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let workforce = state.workforce();
    let mut guard = workforce.write();
    guard.delete_project(&project_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Task create/update responses carry the advisory warning alongside the
/// updated aggregate so the client gets both in one round trip.
#[derive(Debug, Serialize)]
struct TaskMutationResponse {
    project: Project,
    conflicts: Vec<String>,
}

async fn add_task(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(task): Json<Task>,
) -> Result<(StatusCode, Json<TaskMutationResponse>), ApiError> {
    let workforce = state.workforce();
    let (project, conflicts) = {
        let mut guard = workforce.write();
        guard.add_task(&project_id, task)?
    };
    Ok((
        StatusCode::CREATED,
        Json(TaskMutationResponse { project, conflicts }),
    ))
}

async fn update_task(
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(String, String)>,
    Json(task): Json<Task>,
) -> Result<Json<TaskMutationResponse>, ApiError> {
    let workforce = state.workforce();
    let (project, conflicts) = {
        let mut guard = workforce.write();
        guard.update_task(&project_id, &task_id, task)?
    };
    Ok(Json(TaskMutationResponse { project, conflicts }))
}

async fn delete_task(
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(String, String)>,
) -> Result<Json<Project>, ApiError> {
    let workforce = state.workforce();
    let project = {
        let mut guard = workforce.write();
        guard.remove_task(&project_id, &task_id)?
    };
    Ok(Json(project))
}

#[derive(Debug, Deserialize)]
struct StatusPayload {
    status: TaskStatus,
    role: UserRole,
}

async fn set_task_status(
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(String, String)>,
    Json(payload): Json<StatusPayload>,
) -> Result<Json<Task>, ApiError> {
    let workforce = state.workforce();
    let task = {
        let mut guard = workforce.write();
        guard.set_task_status(&project_id, &task_id, payload.status, payload.role)?
    };
    Ok(Json(task))
}

async fn get_timeline(State(state): State<AppState>) -> Json<Vec<TimelineEntry>> {
    let workforce = state.workforce();
    let guard = workforce.read();
    Json(guard.timeline())
}

async fn create_material(
    State(state): State<AppState>,
    Json(request): Json<MaterialRequest>,
) -> Result<(StatusCode, Json<MaterialRequest>), ApiError> {
    let workforce = state.workforce();
    let created = {
        let mut guard = workforce.write();
        guard.create_material_request(request)?
    };
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_material(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    Json(request): Json<MaterialRequest>,
) -> Result<Json<MaterialRequest>, ApiError> {
    let workforce = state.workforce();
    let updated = {
        let mut guard = workforce.write();
        guard.update_material_request(&request_id, request)?
    };
    Ok(Json(updated))
}
