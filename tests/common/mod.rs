use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use task_manager_backend::db;

// One connection keeps every query on the same in-memory database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    db::init_schema(&pool)
        .await
        .expect("failed to initialize schema");
    pool
}
