//! Posts Domain
//!
//! Posts are written inside a community; comments hang off posts.
//! A post can only be created for an existing community and a comment
//! only for an existing post.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, audit events
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← User checks, post detail assembly
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory / Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Post, Comment, DTOs
//! └─────────────┘
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{PostError, PostResult};
pub use models::{
    Comment, CreateComment, CreatePost, DeleteParams, ListPostsParams, Post, PostDetail,
    PostType, UpdateComment, UpdatePost,
};
pub use postgres::PgPostRepository;
pub use repository::{InMemoryPostRepository, PostRepository};
pub use service::PostService;
