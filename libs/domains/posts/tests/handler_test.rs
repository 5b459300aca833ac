//! Handler tests for Posts domain
//!
//! The posts router runs against in-memory repositories; the community
//! it posts into is created directly in the shared community store.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_communities::{
    CommunityRepository, CommunityType, InMemoryCommunityRepository, RegisterCommunity,
};
use domain_posts::*;
use http_body_util::BodyExt;
use identity_client::InMemoryIdentityClient;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

const USER: i32 = 2;
const STRANGER: i32 = 77;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Router plus the id of a community that accepts posts
async fn app() -> (Router, i32) {
    let communities = InMemoryCommunityRepository::new();
    let community = communities
        .create(
            RegisterCommunity {
                community_type: CommunityType::Official,
                thumbnail: None,
                name: "Announcements".to_string(),
                description: None,
                manager_id: "mgr".to_string(),
                manager_name: "Manager".to_string(),
                manager_email: "mgr@example.com".to_string(),
                registrant: Some(1),
                secret_number: None,
                allow_self_join: true,
            },
            1,
        )
        .await
        .unwrap();

    let identity = Arc::new(InMemoryIdentityClient::new().with_user(USER));
    let service = PostService::new(InMemoryPostRepository::new(communities), identity);

    (handlers::router(service), community.id)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn new_post(community_id: i32, title: &str) -> Value {
    json!({
        "title": title,
        "content": "Body text",
        "post_type": "general",
        "community_id": community_id,
        "registrant": USER
    })
}

async fn create_post(app: &Router, community_id: i32, title: &str) -> i32 {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", new_post(community_id, title)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    body["data"]["id"].as_i64().unwrap() as i32
}

async fn create_comment(app: &Router, post_id: i32, content: &str) -> i32 {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/{}/comments", post_id),
            json!({ "content": content, "registrant": USER }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    body["data"]["id"].as_i64().unwrap() as i32
}

#[tokio::test]
async fn test_create_post_returns_201_envelope() {
    let (app, community_id) = app().await;

    let response = app
        .oneshot(json_request("POST", "/", new_post(community_id, "Hello")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["title"], "Hello");
    assert_eq!(body["data"]["post_type"], "general");
    assert_eq!(body["data"]["modifier"], USER);
}

#[tokio::test]
async fn test_create_post_in_missing_community() {
    let (app, community_id) = app().await;

    let response = app
        .oneshot(json_request("POST", "/", new_post(community_id + 10, "Lost")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_post_requires_known_user() {
    let (app, community_id) = app().await;

    let mut input = new_post(community_id, "Hello");
    input["registrant"] = json!(STRANGER);

    let response = app.oneshot(json_request("POST", "/", input)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_post_validates_input() {
    let (app, community_id) = app().await;

    let mut input = new_post(community_id, "");
    input["content"] = json!("");

    let response = app.oneshot(json_request("POST", "/", input)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"].get("title").is_some());
    assert!(body["details"].get("content").is_some());
}

#[tokio::test]
async fn test_list_posts_newest_first() {
    let (app, community_id) = app().await;
    let first = create_post(&app, community_id, "first").await;
    let second = create_post(&app, community_id, "second").await;

    let response = app
        .oneshot(empty_request("GET", &format!("/?community_id={}", community_id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second as i64, first as i64]);
}

#[tokio::test]
async fn test_get_post_includes_comments_oldest_first() {
    let (app, community_id) = app().await;
    let post_id = create_post(&app, community_id, "with comments").await;
    let first = create_comment(&app, post_id, "first!").await;
    let second = create_comment(&app, post_id, "second").await;

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", post_id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["data"]["id"], post_id);
    assert_eq!(body["data"]["title"], "with comments");
    let ids: Vec<i64> = body["data"]["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first as i64, second as i64]);
}

#[tokio::test]
async fn test_get_post_not_found() {
    let (app, _) = app().await;

    let response = app.oneshot(empty_request("GET", "/404")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_post() {
    let (app, community_id) = app().await;
    let post_id = create_post(&app, community_id, "draft").await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", post_id),
            json!({ "title": "final", "post_type": "question", "modifier": USER }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["data"]["title"], "final");
    assert_eq!(body["data"]["post_type"], "question");
    assert_eq!(body["data"]["content"], "Body text");
    assert_eq!(body["data"]["community_id"], community_id);
}

#[tokio::test]
async fn test_delete_post_requires_user() {
    let (app, community_id) = app().await;
    let post_id = create_post(&app, community_id, "doomed").await;

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/{}", post_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/{}?user_id={}", post_id, USER)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(empty_request("DELETE", &format!("/{}?user_id={}", post_id, USER)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_lifecycle() {
    let (app, community_id) = app().await;
    let post_id = create_post(&app, community_id, "discussion").await;
    let comment_id = create_comment(&app, post_id, "original").await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/comments/{}", comment_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["data"]["post_id"], post_id);
    assert_eq!(body["data"]["content"], "original");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/comments/{}", comment_id),
            json!({ "content": "edited", "modifier": USER }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["data"]["content"], "edited");

    let response = app
        .clone()
        .oneshot(empty_request(
            "DELETE",
            &format!("/comments/{}?user_id={}", comment_id, USER),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/comments/{}", comment_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(empty_request("GET", &format!("/{}/comments", post_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_comment_on_missing_post() {
    let (app, _) = app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/31/comments",
            json!({ "content": "hello?", "registrant": USER }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_query_string_returns_json_error() {
    let (app, _) = app().await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().contains("community_id"));

    let response = app
        .oneshot(empty_request("DELETE", "/comments/1?user_id=bob"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}
