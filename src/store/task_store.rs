//! Task persistence: CRUD plus search, statistics, assignment and the
//! eager-loading read models.
//!
//! `created_at` is set here on every insert; caller-supplied values never
//! reach the row.

use chrono::{NaiveDateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::error::{ApiError, EntityKind};
use crate::models::comment::Comment;
use crate::models::task::{StatusCount, Task, TaskDetail, TaskStats, TaskWithUser, UserTaskCount};
use crate::models::user::User;
use crate::store::user_store;

const TASK_COLUMNS: &str = "id, title, description, status, created_at, user_id";

pub async fn create(
    pool: &SqlitePool,
    title: &str,
    description: &str,
    status: &str,
    user_id: Option<i64>,
) -> Result<Task, ApiError> {
    if let Some(user_id) = user_id {
        ensure_user_exists(pool, user_id).await?;
    }

    let created_at = Utc::now().naive_utc();
    let result = sqlx::query(
        "INSERT INTO tasks (title, description, status, created_at, user_id)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(title)
    .bind(description)
    .bind(status)
    .bind(created_at)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(Task {
        id: result.last_insert_rowid(),
        title: title.to_string(),
        description: description.to_string(),
        status: status.to_string(),
        created_at,
        user_id,
    })
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Task, ApiError> {
    sqlx::query_as::<_, Task>(&format!("SELECT {} FROM tasks WHERE id = ?", TASK_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::NotFound {
            kind: EntityKind::Task,
            id,
        })
}

/// Fetches one task with its assigned user and comments resolved.
pub async fn get_with_relations(pool: &SqlitePool, id: i64) -> Result<TaskDetail, ApiError> {
    let task = get(pool, id).await?;

    let assigned_user = match task.user_id {
        Some(user_id) => {
            sqlx::query_as::<_, User>("SELECT id, name, version FROM users WHERE id = ?")
                .bind(user_id)
                .fetch_optional(pool)
                .await?
        }
        None => None,
    };

    let comments = sqlx::query_as::<_, Comment>(
        "SELECT id, content, task_id, user_id, created_at
         FROM comments WHERE task_id = ? ORDER BY id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(TaskDetail {
        task,
        assigned_user,
        comments,
    })
}

/// Lists tasks in insertion order, each with its assigned user, optionally
/// narrowed to one status.
pub async fn list(pool: &SqlitePool, status: Option<&str>) -> Result<Vec<TaskWithUser>, ApiError> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT t.id, t.title, t.description, t.status, t.created_at, t.user_id,
                u.id AS assigned_user_id, u.name AS assigned_user_name,
                u.version AS assigned_user_version
         FROM tasks t LEFT JOIN users u ON u.id = t.user_id",
    );
    if let Some(status) = status {
        builder.push(" WHERE t.status = ").push_bind(status);
    }
    builder.push(" ORDER BY t.id");

    let rows = builder.build().fetch_all(pool).await?;
    let mut tasks = Vec::with_capacity(rows.len());
    for row in rows {
        tasks.push(row_to_task_with_user(&row)?);
    }
    Ok(tasks)
}

/// Every task, bare, in insertion order. Backs the CSV export.
pub async fn all(pool: &SqlitePool) -> Result<Vec<Task>, ApiError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks ORDER BY id",
        TASK_COLUMNS
    ))
    .fetch_all(pool)
    .await?;
    Ok(tasks)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    description: &str,
    status: &str,
    user_id: Option<i64>,
) -> Result<(), ApiError> {
    get(pool, id).await?;
    if let Some(user_id) = user_id {
        ensure_user_exists(pool, user_id).await?;
    }

    sqlx::query("UPDATE tasks SET title = ?, description = ?, status = ?, user_id = ? WHERE id = ?")
        .bind(title)
        .bind(description)
        .bind(status)
        .bind(user_id)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Deletes the task together with its comments, atomically.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), ApiError> {
    get(pool, id).await?;

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM comments WHERE task_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM tasks WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(())
}

/// Keyword substring match over title/description plus a minimum creation
/// time, combined conjunctively. Matching follows SQLite `LIKE`:
/// case-insensitive for ASCII, case-sensitive beyond.
///
/// `assigned_to` is accepted for interface stability but generates no
/// predicate.
pub async fn search(
    pool: &SqlitePool,
    keyword: Option<&str>,
    _assigned_to: Option<i64>,
    created_after: Option<NaiveDateTime>,
) -> Result<Vec<Task>, ApiError> {
    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {} FROM tasks WHERE 1 = 1", TASK_COLUMNS));

    if let Some(keyword) = keyword.filter(|k| !k.is_empty()) {
        let pattern = format!("%{}%", keyword);
        builder
            .push(" AND (title LIKE ")
            .push_bind(pattern.clone())
            .push(" OR description LIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(created_after) = created_after {
        builder.push(" AND created_at >= ").push_bind(created_after);
    }
    builder.push(" ORDER BY id");

    let tasks = builder.build_query_as::<Task>().fetch_all(pool).await?;
    Ok(tasks)
}

/// Total task count, counts grouped by status, and per-user owned-task
/// counts. Users owning no task appear with a count of zero.
pub async fn stats(pool: &SqlitePool) -> Result<TaskStats, ApiError> {
    let total_tasks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
        .fetch_one(pool)
        .await?;

    let tasks_by_status = sqlx::query_as::<_, StatusCount>(
        "SELECT status, COUNT(*) AS count FROM tasks GROUP BY status ORDER BY status",
    )
    .fetch_all(pool)
    .await?;

    let tasks_by_user = sqlx::query_as::<_, UserTaskCount>(
        "SELECT u.name AS user_name, COUNT(t.id) AS task_count
         FROM users u LEFT JOIN tasks t ON t.user_id = u.id
         GROUP BY u.id, u.name ORDER BY u.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(TaskStats {
        total_tasks,
        tasks_by_status,
        tasks_by_user,
    })
}

/// Sets the task's owner. Names whichever of task/user is missing.
pub async fn assign(pool: &SqlitePool, task_id: i64, user_id: i64) -> Result<Task, ApiError> {
    let task = get(pool, task_id).await?;
    ensure_user_exists(pool, user_id).await?;

    sqlx::query("UPDATE tasks SET user_id = ? WHERE id = ?")
        .bind(user_id)
        .bind(task_id)
        .execute(pool)
        .await?;

    Ok(Task {
        user_id: Some(user_id),
        ..task
    })
}

async fn ensure_user_exists(pool: &SqlitePool, user_id: i64) -> Result<(), ApiError> {
    if !user_store::exists(pool, user_id).await? {
        return Err(ApiError::NotFound {
            kind: EntityKind::User,
            id: user_id,
        });
    }
    Ok(())
}

fn row_to_task_with_user(row: &SqliteRow) -> Result<TaskWithUser, sqlx::Error> {
    let task = Task {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
        user_id: row.try_get("user_id")?,
    };

    let assigned_user = match row.try_get::<Option<i64>, _>("assigned_user_id")? {
        Some(id) => Some(User {
            id,
            name: row.try_get("assigned_user_name")?,
            version: row.try_get("assigned_user_version")?,
        }),
        None => None,
    };

    Ok(TaskWithUser {
        task,
        assigned_user,
    })
}
