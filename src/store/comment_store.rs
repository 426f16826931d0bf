//! Comment persistence. Comments are created and deleted, never updated.

use chrono::{NaiveDateTime, Utc};
use sqlx::SqlitePool;

use crate::error::{ApiError, EntityKind};
use crate::models::comment::Comment;

/// Inserts a comment after checking the referenced task exists. The
/// `user_id` is stored as given, without an existence check. A missing
/// `created_at` is filled with the current server time; a supplied one is
/// kept verbatim.
pub async fn create(
    pool: &SqlitePool,
    content: &str,
    task_id: i64,
    user_id: i64,
    created_at: Option<NaiveDateTime>,
) -> Result<Comment, ApiError> {
    let task_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE id = ?")
        .bind(task_id)
        .fetch_one(pool)
        .await?;
    if task_count == 0 {
        return Err(ApiError::NotFound {
            kind: EntityKind::Task,
            id: task_id,
        });
    }

    let created_at = created_at.unwrap_or_else(|| Utc::now().naive_utc());
    let result = sqlx::query(
        "INSERT INTO comments (content, task_id, user_id, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(content)
    .bind(task_id)
    .bind(user_id)
    .bind(created_at)
    .execute(pool)
    .await?;

    Ok(Comment {
        id: result.last_insert_rowid(),
        content: content.to_string(),
        task_id,
        user_id,
        created_at,
    })
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Comment, ApiError> {
    sqlx::query_as::<_, Comment>(
        "SELECT id, content, task_id, user_id, created_at FROM comments WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(ApiError::NotFound {
        kind: EntityKind::Comment,
        id,
    })
}

pub async fn list_by_task(pool: &SqlitePool, task_id: i64) -> Result<Vec<Comment>, ApiError> {
    let comments = sqlx::query_as::<_, Comment>(
        "SELECT id, content, task_id, user_id, created_at
         FROM comments WHERE task_id = ? ORDER BY id",
    )
    .bind(task_id)
    .fetch_all(pool)
    .await?;
    Ok(comments)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), ApiError> {
    get(pool, id).await?;
    sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
