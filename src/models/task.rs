use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::comment::Comment;
use crate::models::user::User;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub user_id: Option<i64>,
}

// Read model for task lists: each task carries its assigned user, if any.
#[derive(Debug, Serialize)]
pub struct TaskWithUser {
    #[serde(flatten)]
    pub task: Task,
    pub assigned_user: Option<User>,
}

// Read model for single-task fetches: assigned user plus comments.
#[derive(Debug, Serialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub assigned_user: Option<User>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct UserTaskCount {
    pub user_name: String,
    pub task_count: i64,
}

#[derive(Debug, Serialize)]
pub struct TaskStats {
    pub total_tasks: i64,
    pub tasks_by_status: Vec<StatusCount>,
    pub tasks_by_user: Vec<UserTaskCount>,
}
