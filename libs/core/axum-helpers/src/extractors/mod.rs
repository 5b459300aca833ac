//! Custom extractors for Axum handlers.
//!
//! All extractors reject with [`AppError`](crate::AppError), so bad input
//! renders with the same JSON error body as domain errors.

pub mod id_path;
pub mod query_params;
pub mod validated_json;

pub use id_path::{IdPairPath, IdPath};
pub use query_params::QueryParams;
pub use validated_json::ValidatedJson;
