use axum::{
    Router,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ApiResponse, AuditEvent, AuditOutcome, IdPath, QueryParams, ValidatedJson,
    errors::responses::{
        BadRequestPathResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::PostResult;
use crate::models::{
    Comment, CreateComment, CreatePost, DeleteParams, ListPostsParams, Post, PostDetail,
    PostType, UpdateComment, UpdatePost,
};
use crate::repository::PostRepository;
use crate::service::PostService;

pub const TAG: &str = "posts";

/// OpenAPI documentation for Posts API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_posts,
        create_post,
        get_post,
        update_post,
        delete_post,
        list_comments,
        create_comment,
        get_comment,
        update_comment,
        delete_comment,
    ),
    components(
        schemas(
            Post,
            PostType,
            PostDetail,
            Comment,
            CreatePost,
            UpdatePost,
            CreateComment,
            UpdateComment,
            DeleteParams,
            ListPostsParams
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestPathResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Post and comment endpoints")
    )
)]
pub struct ApiDoc;

/// Create the post router with all HTTP endpoints
pub fn router<R: PostRepository + 'static>(service: PostService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route(
            "/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/{id}/comments", get(list_comments).post(create_comment))
        .route(
            "/comments/{comment_id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
        .with_state(shared_service)
}

fn audit(headers: &HeaderMap, actor: Option<i32>, action: &str, resource: String) {
    AuditEvent::new(actor, action, Some(resource), AuditOutcome::Success)
        .with_ip(extract_ip_from_headers(headers))
        .with_user_agent(extract_user_agent(headers))
        .log();
}

/// List the posts of a community, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ListPostsParams),
    responses(
        (status = 200, description = "List of posts", body = ApiResponse<Vec<Post>>),
        (status = 400, description = "Missing or invalid community_id"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_posts<R: PostRepository>(
    State(service): State<Arc<PostService<R>>>,
    QueryParams(params): QueryParams<ListPostsParams>,
) -> PostResult<ApiResponse<Vec<Post>>> {
    let posts = service.list_posts(params.community_id).await?;
    Ok(ApiResponse::success("Posts found", posts))
}

/// Create a post
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreatePost,
    responses(
        (status = 201, description = "Post created", body = ApiResponse<Post>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_post<R: PostRepository>(
    State(service): State<Arc<PostService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreatePost>,
) -> PostResult<impl IntoResponse> {
    let post = service.create_post(input).await?;

    AuditEvent::new(
        Some(post.registrant),
        "post.create",
        Some(format!("post:{}", post.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({
        "community_id": post.community_id,
        "post_type": post.post_type.to_string(),
    }))
    .log();

    Ok(ApiResponse::created("Post created", post))
}

/// Get a post with its comments
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post found", body = ApiResponse<PostDetail>),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_post<R: PostRepository>(
    State(service): State<Arc<PostService<R>>>,
    IdPath(id): IdPath,
) -> PostResult<ApiResponse<PostDetail>> {
    let detail = service.get_post(id).await?;
    Ok(ApiResponse::success("Post found", detail))
}

/// Update a post
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    request_body = UpdatePost,
    responses(
        (status = 200, description = "Post updated", body = ApiResponse<Post>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_post<R: PostRepository>(
    State(service): State<Arc<PostService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdatePost>,
) -> PostResult<ApiResponse<Post>> {
    let post = service.update_post(id, input).await?;
    audit(&headers, Some(post.modifier), "post.update", format!("post:{}", id));
    Ok(ApiResponse::success("Post updated", post))
}

/// Delete a post and its comments
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Post ID"),
        DeleteParams
    ),
    responses(
        (status = 200, description = "Post deleted", body = ApiResponse<i32>),
        (status = 400, response = BadRequestPathResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_post<R: PostRepository>(
    State(service): State<Arc<PostService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    QueryParams(params): QueryParams<DeleteParams>,
) -> PostResult<ApiResponse<i32>> {
    service.delete_post(id, params.user_id).await?;
    audit(&headers, params.user_id, "post.delete", format!("post:{}", id));
    Ok(ApiResponse::success("Post deleted", id))
}

/// List the comments of a post, oldest first
#[utoipa::path(
    get,
    path = "/{id}/comments",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "List of comments", body = ApiResponse<Vec<Comment>>),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_comments<R: PostRepository>(
    State(service): State<Arc<PostService<R>>>,
    IdPath(id): IdPath,
) -> PostResult<ApiResponse<Vec<Comment>>> {
    let comments = service.list_comments(id).await?;
    Ok(ApiResponse::success("Comments found", comments))
}

/// Comment on a post
#[utoipa::path(
    post,
    path = "/{id}/comments",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    request_body = CreateComment,
    responses(
        (status = 201, description = "Comment created", body = ApiResponse<Comment>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_comment<R: PostRepository>(
    State(service): State<Arc<PostService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<CreateComment>,
) -> PostResult<impl IntoResponse> {
    let comment = service.create_comment(id, input).await?;
    audit(
        &headers,
        Some(comment.registrant),
        "comment.create",
        format!("comment:{}", comment.id),
    );
    Ok(ApiResponse::created("Comment created", comment))
}

/// Get a single comment
#[utoipa::path(
    get,
    path = "/comments/{comment_id}",
    tag = TAG,
    params(
        ("comment_id" = i32, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment found", body = ApiResponse<Comment>),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_comment<R: PostRepository>(
    State(service): State<Arc<PostService<R>>>,
    IdPath(comment_id): IdPath,
) -> PostResult<ApiResponse<Comment>> {
    let comment = service.get_comment(comment_id).await?;
    Ok(ApiResponse::success("Comment found", comment))
}

/// Replace the content of a comment
#[utoipa::path(
    put,
    path = "/comments/{comment_id}",
    tag = TAG,
    params(
        ("comment_id" = i32, Path, description = "Comment ID")
    ),
    request_body = UpdateComment,
    responses(
        (status = 200, description = "Comment updated", body = ApiResponse<Comment>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_comment<R: PostRepository>(
    State(service): State<Arc<PostService<R>>>,
    headers: HeaderMap,
    IdPath(comment_id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateComment>,
) -> PostResult<ApiResponse<Comment>> {
    let comment = service.update_comment(comment_id, input).await?;
    audit(
        &headers,
        Some(comment.modifier),
        "comment.update",
        format!("comment:{}", comment_id),
    );
    Ok(ApiResponse::success("Comment updated", comment))
}

/// Delete a comment
#[utoipa::path(
    delete,
    path = "/comments/{comment_id}",
    tag = TAG,
    params(
        ("comment_id" = i32, Path, description = "Comment ID"),
        DeleteParams
    ),
    responses(
        (status = 200, description = "Comment deleted", body = ApiResponse<i32>),
        (status = 400, response = BadRequestPathResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_comment<R: PostRepository>(
    State(service): State<Arc<PostService<R>>>,
    headers: HeaderMap,
    IdPath(comment_id): IdPath,
    QueryParams(params): QueryParams<DeleteParams>,
) -> PostResult<ApiResponse<i32>> {
    service.delete_comment(comment_id, params.user_id).await?;
    audit(
        &headers,
        params.user_id,
        "comment.delete",
        format!("comment:{}", comment_id),
    );
    Ok(ApiResponse::success("Comment deleted", comment_id))
}
