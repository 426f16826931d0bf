use actix_web::{web, HttpResponse};
use log::info;
use serde_json::json;
use sqlx::SqlitePool;

use super::comment_models::CreateCommentRequest;
use crate::error::ApiError;
use crate::store::comment_store;
use crate::validation;

pub async fn post_comment(
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, ApiError> {
    let errors = validation::validate_comment(body.content.as_deref());
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    info!("Creating comment on task {}", body.task_id);
    let comment = comment_store::create(
        pool.get_ref(),
        body.content.as_deref().unwrap_or_default(),
        body.task_id,
        body.user_id,
        body.created_at,
    )
    .await?;

    Ok(HttpResponse::Created().json(comment))
}

pub async fn get_comments_by_task(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let task_id = path.into_inner();
    let comments = comment_store::list_by_task(pool.get_ref(), task_id).await?;

    if comments.is_empty() {
        return Ok(HttpResponse::NotFound().json(json!({
            "error": "No comments found for the task",
            "task_id": task_id,
        })));
    }

    Ok(HttpResponse::Ok().json(comments))
}

pub async fn get_comment(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let comment = comment_store::get(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comment))
}

pub async fn delete_comment(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    info!("Deleting comment {}", id);
    comment_store::delete(pool.get_ref(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}
