use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::api::shared::ErrorResponse;
use crate::db::StoreError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no video found with id {0}")]
    NotFound(i32),

    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("{0}")]
    BadRequest(String),

    #[error("a video with id {0} already exists")]
    Conflict(i32),

    #[error("storage error: {0}")]
    Storage(String),
}

impl AppError {
    fn cause(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::Validation { .. } => "validation",
            AppError::BadRequest(_) => "bad_request",
            AppError::Conflict(_) => "conflict",
            AppError::Storage(_) => "storage",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(id) => AppError::Conflict(id),
            other => AppError::Storage(other.to_string()),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let field = match self {
            AppError::Validation { field, .. } => Some(*field),
            _ => None,
        };
        let message = match self {
            AppError::Storage(detail) => {
                log::error!("Storage failure: {}", detail);
                "Database error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse::new(
            self.cause(),
            field,
            message,
        ))
    }
}
