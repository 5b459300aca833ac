//! Client for the external user identity service.
//!
//! The community and post services never trust a user id on their own:
//! before a write they ask the identity service whether the acting user
//! exists (or is an admin).
//!
//! ```text
//! ┌──────────────┐  require_user / require_admin  ┌────────────────────┐
//! │   Service    │ ─────────────────────────────▶ │  IdentityClient    │
//! └──────────────┘                                │  (trait)           │
//!                                                 └─────────┬──────────┘
//!                                     ┌─────────────────────┴───────────┐
//!                                     ▼                                 ▼
//!                          HttpIdentityClient               InMemoryIdentityClient
//!                          GET /user/client/check/{id}      fixed user/admin sets
//!                          GET /user/client/checkAdmin/{id}
//! ```
//!
//! Every failure talking to the remote service (transport error, timeout,
//! non-2xx status, malformed body) is logged and answered with `false`.

mod authorize;
mod client;
mod config;
mod memory;

pub use authorize::{AuthorizationError, require_admin, require_user};
pub use client::{HttpIdentityClient, IdentityClient};
pub use config::IdentityConfig;
pub use memory::InMemoryIdentityClient;
