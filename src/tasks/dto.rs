use serde::{Deserialize, Serialize};

/// Request body for task creation. Status arrives as a raw string; values
/// outside the enumerated set are rejected before reaching storage.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Partial task update; only fields present in the body are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TaskDeleted {
    pub message: String,
}
