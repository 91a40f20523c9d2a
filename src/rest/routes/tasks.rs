// rest/routes/tasks.rs — Task REST routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::storage::TaskRow;
use crate::tasks::{CreateTask, TaskError, UpdateTask};
use crate::AppContext;

type ApiError = (StatusCode, Json<Value>);

/// Translate a domain error into the wire shape `{message, error?}`.
/// `context` is the operation-specific 500 message; the store detail rides
/// along as an opaque diagnostic string.
fn error_response(err: TaskError, context: &str) -> ApiError {
    match err {
        TaskError::Validation(message) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "message": message })))
        }
        TaskError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Task not found" })),
        ),
        TaskError::Store(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": context, "error": format!("{e:#}") })),
        ),
    }
}

pub async fn list_tasks(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Vec<TaskRow>>, ApiError> {
    ctx.tasks
        .list()
        .await
        .map(Json)
        .map_err(|e| error_response(e, "Error fetching tasks"))
}

pub async fn get_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<TaskRow>, ApiError> {
    ctx.tasks
        .get(&id)
        .await
        .map(Json)
        .map_err(|e| error_response(e, "Error fetching task"))
}

pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<CreateTask>,
) -> Result<(StatusCode, Json<TaskRow>), ApiError> {
    ctx.tasks
        .create(body)
        .await
        .map(|task| (StatusCode::CREATED, Json(task)))
        .map_err(|e| error_response(e, "Error creating task"))
}

pub async fn update_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTask>,
) -> Result<Json<TaskRow>, ApiError> {
    ctx.tasks
        .update(&id, body)
        .await
        .map(Json)
        .map_err(|e| error_response(e, "Error updating task"))
}

pub async fn toggle_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<TaskRow>, ApiError> {
    ctx.tasks
        .toggle(&id)
        .await
        .map(Json)
        .map_err(|e| error_response(e, "Error toggling task"))
}

pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    ctx.tasks
        .delete(&id)
        .await
        .map(|()| Json(json!({ "message": "Task deleted successfully" })))
        .map_err(|e| error_response(e, "Error deleting task"))
}
