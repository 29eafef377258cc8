use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    state::AppState,
    tasks::{
        dto::{CreateTaskRequest, TaskDeleted, UpdateTaskRequest},
        repo::{Task, TaskStatus},
    },
};

pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/task", get(list_tasks).post(create_task))
        .route("/task/:id", put(update_task).delete(delete_task))
}

#[instrument(skip(state))]
pub async fn list_tasks(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = Task::list_by_user(&state.db, user_id).await?;
    Ok(Json(tasks))
}

#[instrument(skip(state, payload))]
pub async fn create_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let title = payload.title.trim();
    if title.is_empty() {
        warn!(user_id = %user_id, "create task rejected: empty title");
        return Err(ApiError::InvalidInput("Title is required".into()));
    }

    let status = match payload.status.as_deref() {
        Some(s) => TaskStatus::parse(s).ok_or_else(|| {
            warn!(user_id = %user_id, status = %s, "create task rejected: unknown status");
            ApiError::InvalidInput("Invalid status".into())
        })?,
        None => TaskStatus::default(),
    };

    let description = payload.description.unwrap_or_default();

    let task = Task::create(&state.db, user_id, title, &description, status).await?;

    info!(user_id = %user_id, task_id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

#[instrument(skip(state, payload))]
pub async fn update_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let title = match payload.title {
        Some(t) => {
            let t = t.trim().to_string();
            if t.is_empty() {
                warn!(user_id = %user_id, %id, "update task rejected: empty title");
                return Err(ApiError::InvalidInput("Title is required".into()));
            }
            Some(t)
        }
        None => None,
    };

    let status = match payload.status.as_deref() {
        Some(s) => Some(TaskStatus::parse(s).ok_or_else(|| {
            warn!(user_id = %user_id, %id, status = %s, "update task rejected: unknown status");
            ApiError::InvalidInput("Invalid status".into())
        })?),
        None => None,
    };

    let task = Task::update(
        &state.db,
        user_id,
        id,
        title.as_deref(),
        payload.description.as_deref(),
        status,
    )
    .await?
    .ok_or(ApiError::NotFound("Task not found or unauthorized"))?;

    info!(user_id = %user_id, task_id = %task.id, "task updated");
    Ok(Json(task))
}

#[instrument(skip(state))]
pub async fn delete_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskDeleted>, ApiError> {
    let deleted = Task::delete(&state.db, user_id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found or unauthorized"));
    }

    info!(user_id = %user_id, task_id = %id, "task deleted");
    Ok(Json(TaskDeleted {
        message: "Task deleted successfully".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Boundary validation runs before any store access; the fake state's
    // lazy pool is never touched on these paths.

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let state = AppState::fake();
        let err = create_task(
            State(state),
            AuthUser(Uuid::new_v4()),
            Json(CreateTaskRequest {
                title: "   ".into(),
                description: None,
                status: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(ref m) if m == "Title is required"));
    }

    #[tokio::test]
    async fn create_rejects_unknown_status() {
        let state = AppState::fake();
        let err = create_task(
            State(state),
            AuthUser(Uuid::new_v4()),
            Json(CreateTaskRequest {
                title: "Buy milk".into(),
                description: None,
                status: Some("archived".into()),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(ref m) if m == "Invalid status"));
    }

    #[tokio::test]
    async fn update_rejects_blank_title() {
        let state = AppState::fake();
        let err = update_task(
            State(state),
            AuthUser(Uuid::new_v4()),
            Path(Uuid::new_v4()),
            Json(UpdateTaskRequest {
                title: Some("  ".into()),
                description: None,
                status: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn update_rejects_unknown_status() {
        let state = AppState::fake();
        let err = update_task(
            State(state),
            AuthUser(Uuid::new_v4()),
            Path(Uuid::new_v4()),
            Json(UpdateTaskRequest {
                title: None,
                description: None,
                status: Some("done".into()),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}
