use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::task::Task;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    // Optimistic concurrency token, bumped on every successful update.
    pub version: i64,
}

// Read model for user fetches: the user plus the tasks assigned to them.
#[derive(Debug, Serialize)]
pub struct UserWithTasks {
    #[serde(flatten)]
    pub user: User,
    pub tasks: Vec<Task>,
}
