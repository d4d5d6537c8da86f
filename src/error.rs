//! Error types for the Book API server

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::problem::{ProblemDetail, ValidationProblem};

const PROBLEM_JSON: &str = "application/problem+json";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A read produced no results where at least one was expected
    #[error("Not found")]
    NotFound,

    #[error("Validation failed for {}", .0.instance())]
    Validation(ValidationProblem),

    /// The request body could not be read as the expected JSON document.
    /// `status` is 415 for a missing or wrong content type, 400 or 422 otherwise.
    #[error("Unreadable request body ({status}): {detail}")]
    UnreadableBody {
        status: StatusCode,
        instance: String,
        detail: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut response = match self {
            AppError::NotFound => return StatusCode::NOT_FOUND.into_response(),
            AppError::Validation(problem) => (problem.status(), Json(problem)).into_response(),
            AppError::UnreadableBody {
                status,
                instance,
                detail,
            } => (
                status,
                Json(
                    ProblemDetail::for_status(status)
                        .with_detail(detail)
                        .with_instance(instance),
                ),
            )
                .into_response(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(
                        ProblemDetail::for_status(StatusCode::INTERNAL_SERVER_ERROR)
                            .with_detail("Database error"),
                    ),
                )
                    .into_response()
            }
        };

        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
        response
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
