use axum::Router;
use domain_communities::{CommunityService, PgCommunityRepository};
use domain_posts::{PgPostRepository, PostService};

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(state: &crate::state::AppState) -> Router {
    let communities = CommunityService::new(
        PgCommunityRepository::new(state.db.clone()),
        state.identity.clone(),
    );
    let posts = PostService::new(
        PgPostRepository::new(state.db.clone()),
        state.identity.clone(),
    );

    Router::new()
        .nest("/communities", domain_communities::handlers::router(communities))
        .nest("/posts", domain_posts::handlers::router(posts))
}

/// Creates a router with the /ready endpoint that pings the database.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
