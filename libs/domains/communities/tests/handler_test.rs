//! Handler tests for Communities domain
//!
//! These tests drive the communities router directly (no app-level
//! middleware) against the in-memory repository:
//! - Request deserialization and validation
//! - The `{success, message, data}` envelope
//! - HTTP status codes and error bodies

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_communities::*;
use http_body_util::BodyExt;
use identity_client::InMemoryIdentityClient;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

const ADMIN: i32 = 1;
const USER: i32 = 2;

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    let identity = Arc::new(InMemoryIdentityClient::new().with_admin(ADMIN).with_user(USER));
    let service = CommunityService::new(InMemoryCommunityRepository::new(), identity);
    handlers::router(service)
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

fn registration(registrant: i32) -> Value {
    json!({
        "type": "study",
        "name": "Rust readers",
        "description": "Weekly chapters",
        "manager_id": "mgr",
        "manager_name": "Manager",
        "manager_email": "mgr@example.com",
        "registrant": registrant,
        "secret_number": "123",
        "allow_self_join": false
    })
}

async fn register(app: &Router) -> i32 {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", registration(ADMIN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    body["data"]["id"].as_i64().unwrap() as i32
}

#[tokio::test]
async fn test_register_community_returns_201_envelope() {
    let app = app();

    let response = app
        .oneshot(json_request("POST", "/", registration(ADMIN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Rust readers");
    assert_eq!(body["data"]["type"], "study");
    assert_eq!(body["data"]["member_count"], 0);
    assert!(body["data"].get("secret_number").is_none());
}

#[tokio::test]
async fn test_register_community_requires_admin() {
    let app = app();

    let response = app
        .oneshot(json_request("POST", "/", registration(USER)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_register_community_validates_input() {
    let app = app();

    let mut input = registration(ADMIN);
    input["manager_email"] = json!("not-an-email");
    input["name"] = json!("");

    let response = app.oneshot(json_request("POST", "/", input)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"].get("manager_email").is_some());
    assert!(body["details"].get("name").is_some());
}

#[tokio::test]
async fn test_register_community_rejects_unknown_type() {
    let app = app();

    let mut input = registration(ADMIN);
    input["type"] = json!("secret-society");

    let response = app.oneshot(json_request("POST", "/", input)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_community_not_found() {
    let app = app();

    let response = app.oneshot(empty_request("GET", "/99")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_community_invalid_id() {
    let app = app();

    let response = app.oneshot(empty_request("GET", "/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_PATH_PARAM");
}

#[tokio::test]
async fn test_list_communities() {
    let app = app();
    register(&app).await;
    register(&app).await;

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_modify_community_keeps_fixed_fields() {
    let app = app();
    let id = register(&app).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", id),
            json!({
                "type": "hobby",
                "name": "Rust writers",
                "manager_email": "hijack@example.com",
                "member_count": 99,
                "modifier": ADMIN
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["data"]["type"], "hobby");
    assert_eq!(body["data"]["name"], "Rust writers");
    assert_eq!(body["data"]["manager_email"], "mgr@example.com");
    assert_eq!(body["data"]["member_count"], 0);
}

#[tokio::test]
async fn test_delete_community_requires_admin() {
    let app = app();
    let id = register(&app).await;

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/{}?user_id={}", id, USER)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/{}?user_id={}", id, ADMIN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["data"], id);

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_community_rejects_non_numeric_user() {
    let app = app();
    let id = register(&app).await;

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/{}?user_id=admin", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "BAD_REQUEST");

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_membership_flow() {
    let app = app();
    let id = register(&app).await;
    let members_uri = format!("/{}/members", id);
    let member_uri = format!("/{}/members/{}", id, USER);

    // Wrong secret
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &members_uri,
            json!({ "user_id": USER, "secret_number": "000" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_SECRET");

    // Correct secret
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &members_uri,
            json!({ "user_id": USER, "registrant": USER, "secret_number": "123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["data"]["user_id"], USER);
    assert_eq!(body["data"]["community_id"], id);

    // Membership is visible
    let response = app
        .clone()
        .oneshot(empty_request("GET", &member_uri))
        .await
        .unwrap();
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["data"]["is_member"], true);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/{}", id)))
        .await
        .unwrap();
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["data"]["member_count"], 1);

    // Joining twice is a conflict
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &members_uri,
            json!({ "user_id": USER, "secret_number": "123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "ALREADY_MEMBER");

    // Leave
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &member_uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["data"]["is_member"], false);

    // Leaving twice fails
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &member_uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_A_MEMBER");

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", id)))
        .await
        .unwrap();
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["data"]["member_count"], 0);
}

#[tokio::test]
async fn test_join_missing_community() {
    let app = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/42/members",
            json!({ "user_id": USER, "secret_number": "123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
