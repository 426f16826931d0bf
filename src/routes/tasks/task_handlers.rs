use actix_web::{web, HttpResponse};
use log::info;
use sqlx::SqlitePool;

use super::task_models::{
    AssignTaskResponse, CreateTaskRequest, SearchQuery, StatusQuery, UpdateTaskRequest,
};
use crate::error::{ApiError, EntityKind};
use crate::store::task_store;
use crate::validation;

// List all tasks, optionally filtered by status.
pub async fn get_tasks(
    pool: web::Data<SqlitePool>,
    query: web::Query<StatusQuery>,
) -> Result<HttpResponse, ApiError> {
    let tasks = task_store::list(pool.get_ref(), query.status.as_deref()).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

// Fetch one task with its assigned user and comments.
pub async fn get_task(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let task = task_store::get_with_relations(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

pub async fn create_task(
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let errors = validation::validate_task(
        body.title.as_deref(),
        body.description.as_deref(),
        body.status.as_deref(),
    );
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    info!(
        "Creating task '{}'",
        body.title.as_deref().unwrap_or_default()
    );
    let task = task_store::create(
        pool.get_ref(),
        body.title.as_deref().unwrap_or_default(),
        body.description.as_deref().unwrap_or_default(),
        body.status.as_deref().unwrap_or_default(),
        body.user_id,
    )
    .await?;

    Ok(HttpResponse::Created().json(task))
}

pub async fn update_task(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if id != body.id {
        return Err(ApiError::IdMismatch {
            kind: EntityKind::Task,
        });
    }

    let errors = validation::validate_task(
        body.title.as_deref(),
        body.description.as_deref(),
        body.status.as_deref(),
    );
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    task_store::update(
        pool.get_ref(),
        id,
        body.title.as_deref().unwrap_or_default(),
        body.description.as_deref().unwrap_or_default(),
        body.status.as_deref().unwrap_or_default(),
        body.user_id,
    )
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub async fn delete_task(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    info!("Deleting task {}", id);
    task_store::delete(pool.get_ref(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn assign_task(
    pool: web::Data<SqlitePool>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, ApiError> {
    let (task_id, user_id) = path.into_inner();
    info!("Assigning task {} to user {}", task_id, user_id);
    let task = task_store::assign(pool.get_ref(), task_id, user_id).await?;

    Ok(HttpResponse::Ok().json(AssignTaskResponse {
        message: "Task assigned successfully".to_string(),
        task,
    }))
}

pub async fn get_task_stats(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let stats = task_store::stats(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(stats))
}

pub async fn search_tasks(
    pool: web::Data<SqlitePool>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let tasks = task_store::search(
        pool.get_ref(),
        query.keyword.as_deref(),
        query.assigned_to,
        query.created_after,
    )
    .await?;
    Ok(HttpResponse::Ok().json(tasks))
}

// Export every task as a CSV attachment, one header row plus one row per
// task.
pub async fn export_tasks_csv(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let tasks = task_store::all(pool.get_ref()).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for task in &tasks {
        writer.serialize(task)?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| ApiError::Csv(e.into_error().into()))?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"tasks_export.csv\"",
        ))
        .body(data))
}
