use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::task::Task;

// Create payload. `created_at` is never read from the caller; unknown
// fields are ignored on deserialization.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

// Update payload carries its own id, compared against the path.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

// `assigned_to` is part of the query interface but applies no filter.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub assigned_to: Option<i64>,
    pub created_after: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub struct AssignTaskResponse {
    pub message: String,
    pub task: Task,
}
