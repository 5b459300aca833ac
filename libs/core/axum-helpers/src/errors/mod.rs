pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Every non-2xx response from the API carries this body:
/// - `code`: integer error code for logging/monitoring (e.g. 1004)
/// - `error`: machine-readable identifier (e.g. "NOT_FOUND")
/// - `message`: human-readable message
/// - `details`: optional structured details (validation field errors)
///
/// ```json
/// {
///   "code": 1101,
///   "error": "ALREADY_MEMBER",
///   "message": "User 7 is already a member of community 3"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates convert their own error enums into this type; it is the
/// only place where errors become status codes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// A membership rule was violated; rendered as 400 with the given code.
    #[error("Membership violation: {message}")]
    Membership { code: ErrorCode, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Status code this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(e) if e.status() == StatusCode::UNSUPPORTED_MEDIA_TYPE => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            AppError::JsonExtractorRejection(_)
            | AppError::ValidationError(_)
            | AppError::InvalidPath(_)
            | AppError::BadRequest(_)
            | AppError::Membership { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(DbErr::RecordNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Error code this error is rendered with.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::JsonExtractorRejection(_) => ErrorCode::JsonExtraction,
            AppError::ValidationError(_) => ErrorCode::ValidationError,
            AppError::InvalidPath(_) => ErrorCode::InvalidPathParam,
            AppError::BadRequest(_) => ErrorCode::BadRequest,
            AppError::Membership { code, .. } => *code,
            AppError::Unauthorized(_) => ErrorCode::Unauthorized,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Database(DbErr::RecordNotFound(_)) => ErrorCode::NotFound,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
            AppError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), status = %status, "{}", self);
        } else {
            tracing::info!(error_code = code.code(), status = %status, "{}", self);
        }

        let (message, details) = match self {
            AppError::JsonExtractorRejection(e) => (e.body_text(), None),
            AppError::ValidationError(e) => (
                code.default_message().to_string(),
                Some(validation_details(&e)),
            ),
            // Internal details stay in the logs
            AppError::Database(DbErr::RecordNotFound(msg)) => (msg, None),
            AppError::Database(_) => (code.default_message().to_string(), None),
            AppError::InvalidPath(msg)
            | AppError::BadRequest(msg)
            | AppError::Membership { message: msg, .. }
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::InternalServerError(msg)
            | AppError::ServiceUnavailable(msg) => (msg, None),
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Flattens validator errors into `{ field: [{code, message, params}] }`.
pub fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let fields = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages: Vec<serde_json::Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), serde_json::Value::Array(messages))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(fields)
}

/// Helper function to create error responses outside of `AppError`.
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    (status, Json(ErrorResponse::new(error_code, message))).into_response()
}
