use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use identity_client::AuthorizationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommunityError {
    #[error("Community not found: {0}")]
    NotFound(i32),

    #[error("User {user_id} is already a member of community {community_id}")]
    AlreadyMember { community_id: i32, user_id: i32 },

    #[error("User {user_id} is not a member of community {community_id}")]
    NotAMember { community_id: i32, user_id: i32 },

    #[error("Secret number does not match for community {0}")]
    InvalidSecret(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthorizationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CommunityResult<T> = Result<T, CommunityError>;

impl From<sea_orm::DbErr> for CommunityError {
    fn from(err: sea_orm::DbErr) -> Self {
        CommunityError::Internal(format!("Database error: {}", err))
    }
}

/// Convert CommunityError to AppError for standardized error responses
impl From<CommunityError> for AppError {
    fn from(err: CommunityError) -> Self {
        match err {
            CommunityError::NotFound(id) => {
                AppError::NotFound(format!("Community {} not found", id))
            }
            e @ CommunityError::AlreadyMember { .. } => AppError::Membership {
                code: ErrorCode::AlreadyMember,
                message: e.to_string(),
            },
            e @ CommunityError::NotAMember { .. } => AppError::Membership {
                code: ErrorCode::NotAMember,
                message: e.to_string(),
            },
            e @ CommunityError::InvalidSecret(_) => AppError::Membership {
                code: ErrorCode::InvalidSecret,
                message: e.to_string(),
            },
            CommunityError::Validation(msg) => AppError::BadRequest(msg),
            CommunityError::Unauthorized(e) => AppError::Unauthorized(e.to_string()),
            CommunityError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CommunityError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
