//! Communities Domain
//!
//! Communities are groups users join, optionally gated by a secret number.
//! The Community aggregate owns its Member records and keeps
//! `member_count` in step with them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, audit events
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Admin checks, secret gate, membership rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory / Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Community, Member, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_communities::{
//!     handlers,
//!     repository::InMemoryCommunityRepository,
//!     service::CommunityService,
//! };
//! use identity_client::InMemoryIdentityClient;
//!
//! let repository = InMemoryCommunityRepository::new();
//! let identity = Arc::new(InMemoryIdentityClient::new().with_admin(1));
//! let service = CommunityService::new(repository, identity);
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CommunityError, CommunityResult};
pub use models::{
    Community, CommunityType, DeleteParams, JoinMember, Member, MembershipStatus,
    ModifyCommunity, RegisterCommunity,
};
pub use postgres::PgCommunityRepository;
pub use repository::{CommunityRepository, InMemoryCommunityRepository};
pub use service::CommunityService;
