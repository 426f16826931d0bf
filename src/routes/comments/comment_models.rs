use chrono::NaiveDateTime;
use serde::Deserialize;

// Unlike tasks, a caller-supplied `created_at` is kept; the server only
// fills it when absent.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub task_id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}
