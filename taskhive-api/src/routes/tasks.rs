/// Task CRUD endpoints
///
/// All routes here sit behind the JWT middleware and receive the requester
/// via the [`AuthContext`] extractor. Every model call below passes the
/// requester's id through to the query, so a task owned by someone else is
/// reported exactly like a missing one: 404, never 403.
///
/// # Endpoints
///
/// - `GET    /v1/tasks`            - List tasks, optional `status` / `search` filters
/// - `POST   /v1/tasks`            - Create a task (starts as OPEN)
/// - `GET    /v1/tasks/:id`        - Get one task
/// - `PATCH  /v1/tasks/:id/status` - Update a task's status
/// - `DELETE /v1/tasks/:id`        - Delete a task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskhive_shared::{
    auth::middleware::AuthContext,
    models::task::{CreateTask, Task, TaskFilter, TaskStatus},
};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for listing tasks
///
/// `status` arrives as a raw string and is validated here at the boundary,
/// before anything touches the model layer.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    /// Only tasks in this status (case-insensitive)
    pub status: Option<String>,

    /// Case-insensitive substring match against title or description
    pub search: Option<String>,
}

/// Request body for creating a task
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Request body for updating a task's status
#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatusRequest {
    /// New status value (case-insensitive)
    pub status: String,
}

fn task_not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("task '{}' is not found", id))
}

/// List tasks handler
///
/// Returns every task the requester owns that matches all supplied filters;
/// no filters returns everything, in insertion order.
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let filter = TaskFilter {
        status: query.status.as_deref().map(TaskStatus::parse).transpose()?,
        search: query.search,
    };

    let tasks = Task::list_by_user(&state.db, auth.user_id, &filter).await?;

    Ok(Json(tasks))
}

/// Get task handler
pub async fn get_task(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id_and_user(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| task_not_found(id))?;

    Ok(Json(task))
}

/// Create task handler
///
/// New tasks always start as `OPEN` and are owned by the requester.
/// Responds 201 with the created task.
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            description: req.description,
            user_id: auth.user_id,
        },
    )
    .await?;

    tracing::debug!(task_id = %task.id, user_id = %auth.user_id, "Task created");

    Ok((StatusCode::CREATED, Json(task)))
}

/// Update task status handler
///
/// One ownership-scoped UPDATE resolves and mutates the task; there is no
/// separate lookup.
pub async fn update_task_status(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskStatusRequest>,
) -> ApiResult<Json<Task>> {
    let status = TaskStatus::parse(&req.status)?;

    let task = Task::update_status(&state.db, id, auth.user_id, status)
        .await?
        .ok_or_else(|| task_not_found(id))?;

    Ok(Json(task))
}

/// Delete task handler
///
/// Responds 204 with no body on success.
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Task::delete_by_user(&state.db, id, auth.user_id).await?;

    if !deleted {
        return Err(task_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}
