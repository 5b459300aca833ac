//! # Axum Helpers
//!
//! Shared HTTP plumbing for the community service.
//!
//! ## Modules
//!
//! - **[`server`]**: Router composition, health checks, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Integer id paths and validated JSON bodies
//! - **[`response`]**: The `ApiResponse` success envelope
//! - **[`audit`]**: Audit logging for data-changing requests
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let router = create_router::<ApiDoc>(Router::new())?;
//!     create_production_app(router, &ServerConfig::default(), async {}).await
//! }
//! ```

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use http::{cors_layer_from_env, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPairPath, IdPath, QueryParams, ValidatedJson};

pub use response::ApiResponse;

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
