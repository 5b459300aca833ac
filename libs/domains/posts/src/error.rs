use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_communities::CommunityError;
use identity_client::AuthorizationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("Community not found: {0}")]
    CommunityNotFound(i32),

    #[error("Post not found: {0}")]
    PostNotFound(i32),

    #[error("Comment not found: {0}")]
    CommentNotFound(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthorizationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PostResult<T> = Result<T, PostError>;

impl From<sea_orm::DbErr> for PostError {
    fn from(err: sea_orm::DbErr) -> Self {
        PostError::Internal(format!("Database error: {}", err))
    }
}

// Only reached through community lookups made while creating a post
impl From<CommunityError> for PostError {
    fn from(err: CommunityError) -> Self {
        match err {
            CommunityError::NotFound(id) => PostError::CommunityNotFound(id),
            other => PostError::Internal(other.to_string()),
        }
    }
}

/// Convert PostError to AppError for standardized error responses
impl From<PostError> for AppError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::CommunityNotFound(id) => {
                AppError::NotFound(format!("Community {} not found", id))
            }
            PostError::PostNotFound(id) => AppError::NotFound(format!("Post {} not found", id)),
            PostError::CommentNotFound(id) => {
                AppError::NotFound(format!("Comment {} not found", id))
            }
            PostError::Validation(msg) => AppError::BadRequest(msg),
            PostError::Unauthorized(e) => AppError::Unauthorized(e.to_string()),
            PostError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
