//! Type-safe error codes for API responses.
//!
//! Each code carries a string identifier for clients (e.g. `"NOT_FOUND"`),
//! an integer for logs and dashboards (e.g. `1004`) and a default message.
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::AlreadyMember;
//! assert_eq!(code.as_str(), "ALREADY_MEMBER");
//! assert_eq!(code.code(), 1101);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Request errors (1000-1099)
    /// Request validation failed
    ValidationError,

    /// Path parameter is not a valid identifier
    InvalidPathParam,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// An unexpected internal server error occurred
    InternalError,

    /// Acting user is missing, unknown or lacks the required role
    Unauthorized,

    /// Generic malformed request
    BadRequest,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    // Membership errors (1100-1199)
    /// User already belongs to the community
    AlreadyMember,

    /// User does not belong to the community
    NotAMember,

    /// Join secret did not match
    InvalidSecret,

    // Persistence errors (2000-2999)
    /// Database query or connection failed
    DatabaseError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier for programmatic handling by clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidPathParam => "INVALID_PATH_PARAM",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::BadRequest => "BAD_REQUEST",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::NotAMember => "NOT_A_MEMBER",
            Self::InvalidSecret => "INVALID_SECRET",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// Integer code used in structured logs.
    ///
    /// Ranges:
    /// - 1000-1099: request errors
    /// - 1100-1199: membership rule violations
    /// - 2000-2999: persistence errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidPathParam => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Unauthorized => 1006,
            Self::BadRequest => 1007,
            Self::ServiceUnavailable => 1011,

            Self::AlreadyMember => 1101,
            Self::NotAMember => 1102,
            Self::InvalidSecret => 1103,

            Self::DatabaseError => 2001,
        }
    }

    /// Default user-facing message; handlers usually supply a more specific one.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidPathParam => "Invalid path parameter",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::InternalError => "An internal server error occurred",
            Self::Unauthorized => "User is not authorized for this operation",
            Self::BadRequest => "Bad request",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::AlreadyMember => "User is already a member of this community",
            Self::NotAMember => "User is not a member of this community",
            Self::InvalidSecret => "Secret number does not match",
            Self::DatabaseError => "A database error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
