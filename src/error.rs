use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde_json::json;
use thiserror::Error;

/// Entity kinds referenced by not-found and conflict errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Task,
    User,
    Comment,
}

impl EntityKind {
    fn id_key(self) -> &'static str {
        match self {
            EntityKind::Task => "task_id",
            EntityKind::User => "user_id",
            EntityKind::Comment => "comment_id",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Task => "Task",
            EntityKind::User => "User",
            EntityKind::Comment => "Comment",
        };
        f.write_str(label)
    }
}

/// Errors surfaced by the handlers. Every variant maps to one HTTP response
/// shape; storage errors are logged and never serialized into a body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: i64 },

    #[error("{kind} {id} was modified concurrently")]
    Conflict { kind: EntityKind, id: i64 },

    #[error("{kind} ID mismatch")]
    IdMismatch { kind: EntityKind },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::IdMismatch { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Validation(errors) => {
                HttpResponse::BadRequest().json(json!({ "errors": errors }))
            }
            ApiError::NotFound { kind, id } => {
                let mut body = serde_json::Map::new();
                body.insert("error".into(), json!(format!("{} not found", kind)));
                body.insert(kind.id_key().into(), json!(id));
                HttpResponse::NotFound().json(body)
            }
            ApiError::Conflict { kind, id } => {
                let mut body = serde_json::Map::new();
                body.insert(
                    "error".into(),
                    json!(format!("{} was modified concurrently", kind)),
                );
                body.insert(kind.id_key().into(), json!(id));
                HttpResponse::Conflict().json(body)
            }
            ApiError::IdMismatch { kind } => {
                HttpResponse::BadRequest().json(json!({ "error": format!("{} ID mismatch", kind) }))
            }
            ApiError::Database(e) => {
                error!("Failed to execute query: {}", e);
                HttpResponse::InternalServerError()
                    .json(json!({ "error": "Internal server error" }))
            }
            ApiError::Csv(e) => {
                error!("Failed to serialize CSV export: {}", e);
                HttpResponse::InternalServerError()
                    .json(json!({ "error": "Internal server error" }))
            }
        }
    }
}
