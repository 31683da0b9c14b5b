use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Client-correctable validation failure keyed by field name.
    #[error("{1}")]
    Validation(&'static str, String),

    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

impl AppError {
    /// No active tariff row for a required (city, delivery type) pair.
    /// Missing reference data, so the caller gets a 422, not a 500.
    pub fn pricing_unavailable() -> Self {
        AppError::Validation(
            "pricing",
            "Pricing not available for this city/delivery type combination".to_string(),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::Conflict(msg) => (StatusCode::UNPROCESSABLE_ENTITY, json!({ "error": msg })),
            AppError::Validation(field, msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "errors": { field: [msg] } }),
            ),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            AppError::Db(err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
