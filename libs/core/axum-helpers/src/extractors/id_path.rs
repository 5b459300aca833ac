//! Integer id path parameter extractors.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Extractor for a single integer id path parameter.
///
/// Rejects non-numeric ids with a 400 `INVALID_PATH_PARAM` body instead of
/// axum's plain-text rejection.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_community(IdPath(id): IdPath) -> String {
///     format!("Community {}", id)
/// }
///
/// let app = Router::new().route("/communities/{id}", get(get_community));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidPath(e.body_text()))?;

        parse_id(&raw).map(IdPath)
    }
}

/// Extractor for routes with two integer ids, e.g. `/communities/{id}/members/{user_id}`.
#[derive(Debug, Clone, Copy)]
pub struct IdPairPath(pub i32, pub i32);

impl<S> FromRequestParts<S> for IdPairPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((first, second)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidPath(e.body_text()))?;

        Ok(IdPairPath(parse_id(&first)?, parse_id(&second)?))
    }
}

fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse::<i32>()
        .map_err(|_| AppError::InvalidPath(format!("Invalid id: {}", raw)))
}
