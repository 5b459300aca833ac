//! Success envelope shared by every API endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{ "success": true, "message": "...", "data": ... }`
///
/// Handlers return it directly for 200 responses and wrap it as
/// `(StatusCode::CREATED, ApiResponse::success(..))` for creations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Shorthand for a `201 Created` response.
    pub fn created(message: impl Into<String>, data: T) -> (StatusCode, Self) {
        (StatusCode::CREATED, Self::success(message, data))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
