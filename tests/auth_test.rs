//! Authentication integration tests
//!
//! End-to-end coverage of signup, signin, and the token-protected
//! `/api/auth/me` endpoint.

mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::auth_helpers::signup_user;
use common::test_server;

fn auth_header(value: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(value).unwrap(),
    )
}

#[tokio::test]
async fn signup_returns_user_and_token() {
    let (server, _db) = test_server().await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "password123",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(!body["token"].as_str().unwrap().is_empty());
    // Password material must never be exposed
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn signup_rejects_invalid_email() {
    let (server, _db) = test_server().await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice",
            "email": "not-an-email",
            "password": "password123",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn signup_rejects_short_password() {
    let (server, _db) = test_server().await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "short",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn signup_rejects_duplicate_email() {
    let (server, _db) = test_server().await;
    signup_user(&server, "alice").await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": "password123",
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn signin_returns_same_token_as_signup() {
    let (server, _db) = test_server().await;
    let user = signup_user(&server, "alice").await;

    let response = server
        .post("/api/auth/signin")
        .json(&json!({
            "email": "alice@example.com",
            "password": "password123",
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["token"], user.token.as_str());
    assert_eq!(body["user_id"], user.id);
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
async fn signin_rejects_wrong_password() {
    let (server, _db) = test_server().await;
    signup_user(&server, "alice").await;

    let response = server
        .post("/api/auth/signin")
        .json(&json!({
            "email": "alice@example.com",
            "password": "wrongpassword",
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signin_rejects_unknown_email() {
    let (server, _db) = test_server().await;

    let response = server
        .post("/api/auth/signin")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "password123",
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_current_user() {
    let (server, _db) = test_server().await;
    let user = signup_user(&server, "alice").await;

    let (name, value) = auth_header(&user.auth_header());
    let response = server.get("/api/auth/me").add_header(name, value).await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["id"], user.id);
    assert_eq!(body["username"], "alice");
}

#[tokio::test]
async fn protected_route_requires_token() {
    let (server, _db) = test_server().await;

    let response = server.get("/api/auth/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_rejects_wrong_scheme() {
    let (server, _db) = test_server().await;
    let user = signup_user(&server, "alice").await;

    let (name, value) = auth_header(&format!("Bearer {}", user.token));
    let response = server.get("/api/auth/me").add_header(name, value).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_rejects_unknown_token() {
    let (server, _db) = test_server().await;

    let (name, value) = auth_header("Token definitely-not-issued");
    let response = server.get("/api/auth/me").add_header(name, value).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
