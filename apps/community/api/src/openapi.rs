use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Community API",
        version = "0.1.0",
        description = "API for communities, memberships, posts and comments"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/communities", api = domain_communities::handlers::ApiDoc),
        (path = "/posts", api = domain_posts::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
