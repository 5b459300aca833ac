//! Query string extractor with a JSON rejection.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Query string extractor that rejects with a 400 `BAD_REQUEST` body.
///
/// A missing required field or a value of the wrong type would otherwise
/// produce axum's plain-text rejection.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::extractors::QueryParams;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct ListParams {
///     community_id: i32,
/// }
///
/// async fn list(QueryParams(params): QueryParams<ListParams>) -> String {
///     params.community_id.to_string()
/// }
///
/// let app = Router::new().route("/posts", get(list));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(QueryParams(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Params {
        community_id: i32,
        user_id: Option<i32>,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            get(|QueryParams(p): QueryParams<Params>| async move {
                format!("{}:{:?}", p.community_id, p.user_id)
            }),
        )
    }

    async fn call(uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_query_params_parse() {
        let (status, body) = call("/?community_id=3&user_id=7").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"3:Some(7)");

        let (status, body) = call("/?community_id=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"3:None");
    }

    #[tokio::test]
    async fn test_missing_field_is_json_bad_request() {
        let (status, body) = call("/").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "BAD_REQUEST");
        assert!(body["message"].as_str().unwrap().contains("community_id"));
    }

    #[tokio::test]
    async fn test_non_numeric_value_is_json_bad_request() {
        let (status, body) = call("/?community_id=3&user_id=bob").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "BAD_REQUEST");
    }
}
