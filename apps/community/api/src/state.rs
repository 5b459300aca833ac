//! Shared application state.

use identity_client::IdentityClient;
use std::sync::Arc;

/// Cloned into routers and the readiness handler (Arc clones only)
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Client for the external identity service, shared by both domains
    pub identity: Arc<dyn IdentityClient>,
}
