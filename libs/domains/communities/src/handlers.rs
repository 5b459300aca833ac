use axum::{
    Router,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ApiResponse, AuditEvent, AuditOutcome, IdPairPath, IdPath, QueryParams, ValidatedJson,
    errors::responses::{
        BadRequestPathResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        MembershipViolationResponse, NotFoundResponse, UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CommunityResult;
use crate::models::{
    Community, CommunityType, DeleteParams, JoinMember, Member, MembershipStatus,
    ModifyCommunity, RegisterCommunity,
};
use crate::repository::CommunityRepository;
use crate::service::CommunityService;

pub const TAG: &str = "communities";

/// OpenAPI documentation for Communities API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_communities,
        register_community,
        get_community,
        modify_community,
        delete_community,
        join_member,
        check_membership,
        leave_member,
    ),
    components(
        schemas(
            Community,
            CommunityType,
            Member,
            MembershipStatus,
            RegisterCommunity,
            ModifyCommunity,
            JoinMember,
            DeleteParams
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestPathResponse,
            MembershipViolationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Community and membership endpoints")
    )
)]
pub struct ApiDoc;

/// Create the community router with all HTTP endpoints
pub fn router<R: CommunityRepository + 'static>(service: CommunityService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_communities).post(register_community))
        .route(
            "/{id}",
            get(get_community)
                .put(modify_community)
                .delete(delete_community),
        )
        .route("/{id}/members", post(join_member))
        .route(
            "/{id}/members/{user_id}",
            get(check_membership).delete(leave_member),
        )
        .with_state(shared_service)
}

/// List all communities
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of communities", body = ApiResponse<Vec<Community>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_communities<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
) -> CommunityResult<ApiResponse<Vec<Community>>> {
    let communities = service.list_communities().await?;
    Ok(ApiResponse::success("Communities found", communities))
}

/// Register a new community (admin only)
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = RegisterCommunity,
    responses(
        (status = 201, description = "Community registered", body = ApiResponse<Community>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register_community<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<RegisterCommunity>,
) -> CommunityResult<impl IntoResponse> {
    let community = service.register_community(input).await?;

    AuditEvent::new(
        Some(community.registrant),
        "community.register",
        Some(format!("community:{}", community.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({
        "name": community.name,
        "type": community.community_type.to_string(),
        "allow_self_join": community.allow_self_join,
    }))
    .log();

    Ok(ApiResponse::created("Community registered", community))
}

/// Get a community by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Community ID")
    ),
    responses(
        (status = 200, description = "Community found", body = ApiResponse<Community>),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_community<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    IdPath(id): IdPath,
) -> CommunityResult<ApiResponse<Community>> {
    let community = service.get_community(id).await?;
    Ok(ApiResponse::success("Community found", community))
}

/// Modify a community's display fields (admin only)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Community ID")
    ),
    request_body = ModifyCommunity,
    responses(
        (status = 200, description = "Community modified", body = ApiResponse<Community>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn modify_community<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ModifyCommunity>,
) -> CommunityResult<ApiResponse<Community>> {
    let community = service.modify_community(id, input).await?;

    AuditEvent::new(
        Some(community.modifier),
        "community.modify",
        Some(format!("community:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(ApiResponse::success("Community modified", community))
}

/// Delete a community (admin only)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Community ID"),
        DeleteParams
    ),
    responses(
        (status = 200, description = "Community deleted", body = ApiResponse<i32>),
        (status = 400, response = BadRequestPathResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_community<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    QueryParams(params): QueryParams<DeleteParams>,
) -> CommunityResult<ApiResponse<i32>> {
    service.delete_community(id, params.user_id).await?;

    AuditEvent::new(
        params.user_id,
        "community.delete",
        Some(format!("community:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(ApiResponse::success("Community deleted", id))
}

/// Join a community
#[utoipa::path(
    post,
    path = "/{id}/members",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Community ID")
    ),
    request_body = JoinMember,
    responses(
        (status = 201, description = "Joined community", body = ApiResponse<Member>),
        (status = 400, response = MembershipViolationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn join_member<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<JoinMember>,
) -> CommunityResult<impl IntoResponse> {
    let member = service.join_member(id, input).await?;

    AuditEvent::new(
        Some(member.user_id),
        "community.join",
        Some(format!("community:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(ApiResponse::created("Joined community", member))
}

/// Check whether a user is a member of a community
#[utoipa::path(
    get,
    path = "/{id}/members/{user_id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Community ID"),
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Membership status", body = ApiResponse<MembershipStatus>),
        (status = 400, response = BadRequestPathResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn check_membership<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    IdPairPath(id, user_id): IdPairPath,
) -> CommunityResult<ApiResponse<MembershipStatus>> {
    let status = service.check_membership(id, user_id).await?;
    Ok(ApiResponse::success("Membership checked", status))
}

/// Leave a community
#[utoipa::path(
    delete,
    path = "/{id}/members/{user_id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Community ID"),
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Left community", body = ApiResponse<MembershipStatus>),
        (status = 400, response = MembershipViolationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn leave_member<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    headers: HeaderMap,
    IdPairPath(id, user_id): IdPairPath,
) -> CommunityResult<ApiResponse<MembershipStatus>> {
    let status = service.leave_member(id, user_id).await?;

    AuditEvent::new(
        Some(user_id),
        "community.leave",
        Some(format!("community:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(ApiResponse::success("Left community", status))
}
