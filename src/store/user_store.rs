//! User persistence. Updates use an optimistic version check; deletion
//! unassigns the user's tasks in the same transaction.

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::error::{ApiError, EntityKind};
use crate::models::task::Task;
use crate::models::user::{User, UserWithTasks};

pub async fn create(pool: &SqlitePool, name: &str) -> Result<User, ApiError> {
    let result = sqlx::query("INSERT INTO users (name, version) VALUES (?, 0)")
        .bind(name)
        .execute(pool)
        .await?;

    Ok(User {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        version: 0,
    })
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<User, ApiError> {
    sqlx::query_as::<_, User>("SELECT id, name, version FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::NotFound {
            kind: EntityKind::User,
            id,
        })
}

pub async fn exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

pub async fn get_with_tasks(pool: &SqlitePool, id: i64) -> Result<UserWithTasks, ApiError> {
    let user = get(pool, id).await?;
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, status, created_at, user_id
         FROM tasks WHERE user_id = ? ORDER BY id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(UserWithTasks { user, tasks })
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<UserWithTasks>, ApiError> {
    let users = sqlx::query_as::<_, User>("SELECT id, name, version FROM users ORDER BY id")
        .fetch_all(pool)
        .await?;

    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, status, created_at, user_id
         FROM tasks WHERE user_id IS NOT NULL ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    let mut by_user: HashMap<i64, Vec<Task>> = HashMap::new();
    for task in tasks {
        if let Some(user_id) = task.user_id {
            by_user.entry(user_id).or_default().push(task);
        }
    }

    Ok(users
        .into_iter()
        .map(|user| {
            let tasks = by_user.remove(&user.id).unwrap_or_default();
            UserWithTasks { user, tasks }
        })
        .collect())
}

// The WHERE clause compares the version read by the caller; zero affected
// rows means either a lost race or a vanished row, told apart by re-checking
// existence.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    version: i64,
) -> Result<(), ApiError> {
    let result =
        sqlx::query("UPDATE users SET name = ?, version = version + 1 WHERE id = ? AND version = ?")
            .bind(name)
            .bind(id)
            .bind(version)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        if exists(pool, id).await? {
            return Err(ApiError::Conflict {
                kind: EntityKind::User,
                id,
            });
        }
        return Err(ApiError::NotFound {
            kind: EntityKind::User,
            id,
        });
    }

    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), ApiError> {
    if !exists(pool, id).await? {
        return Err(ApiError::NotFound {
            kind: EntityKind::User,
            id,
        });
    }

    let mut tx = pool.begin().await?;
    sqlx::query("UPDATE tasks SET user_id = NULL WHERE user_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(())
}
