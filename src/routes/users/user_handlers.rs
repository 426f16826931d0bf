use actix_web::{web, HttpResponse};
use log::info;
use sqlx::SqlitePool;

use super::user_models::{CreateUserRequest, UpdateUserRequest};
use crate::error::{ApiError, EntityKind};
use crate::store::user_store;
use crate::validation;

// List all users with the tasks assigned to them.
pub async fn get_users(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let users = user_store::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn get_user(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let user = user_store::get_with_tasks(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn create_user(
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let errors = validation::validate_user(body.name.as_deref());
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    info!("Creating user '{}'", body.name.as_deref().unwrap_or_default());
    let user = user_store::create(pool.get_ref(), body.name.as_deref().unwrap_or_default()).await?;
    Ok(HttpResponse::Created().json(user))
}

pub async fn update_user(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if id != body.id {
        return Err(ApiError::IdMismatch {
            kind: EntityKind::User,
        });
    }

    let errors = validation::validate_user(body.name.as_deref());
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    user_store::update(
        pool.get_ref(),
        id,
        body.name.as_deref().unwrap_or_default(),
        body.version,
    )
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub async fn delete_user(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    info!("Deleting user {}", id);
    user_store::delete(pool.get_ref(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}
