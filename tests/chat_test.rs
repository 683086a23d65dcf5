//! Chat integration tests
//!
//! Covers room creation, membership-scoped listing, and message posting.

mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::auth_helpers::{signup_user, TestUser};
use common::test_server;

fn auth_header(user: &TestUser) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&user.auth_header()).unwrap(),
    )
}

#[tokio::test]
async fn create_room_adds_creator_as_participant() {
    let (server, _db) = test_server().await;
    let user = signup_user(&server, "alice").await;

    let (name, value) = auth_header(&user);
    let response = server
        .post("/api/rooms")
        .add_header(name, value)
        .json(&json!({ "name": "general" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let room: Value = response.json();
    assert_eq!(room["name"], "general");
    let participants = room["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0]["username"], "alice");
}

#[tokio::test]
async fn create_room_rejects_blank_name() {
    let (server, _db) = test_server().await;
    let user = signup_user(&server, "alice").await;

    let (name, value) = auth_header(&user);
    let response = server
        .post("/api/rooms")
        .add_header(name, value)
        .json(&json!({ "name": "  " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn room_listing_is_scoped_to_membership() {
    let (server, _db) = test_server().await;
    let alice = signup_user(&server, "alice").await;
    let bob = signup_user(&server, "bob").await;

    let (name, value) = auth_header(&alice);
    server
        .post("/api/rooms")
        .add_header(name, value)
        .json(&json!({ "name": "general" }))
        .await
        .assert_status(StatusCode::CREATED);

    let (name, value) = auth_header(&alice);
    let response = server.get("/api/rooms").add_header(name, value).await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 1);

    let (name, value) = auth_header(&bob);
    let response = server.get("/api/rooms").add_header(name, value).await;
    response.assert_status(StatusCode::OK);
    assert!(response.json::<Value>().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn participant_posts_and_reads_messages() {
    let (server, _db) = test_server().await;
    let user = signup_user(&server, "alice").await;

    let (name, value) = auth_header(&user);
    let room: Value = server
        .post("/api/rooms")
        .add_header(name, value)
        .json(&json!({ "name": "general" }))
        .await
        .json();
    let room_id = room["id"].as_i64().unwrap();

    let (name, value) = auth_header(&user);
    let response = server
        .post(&format!("/api/rooms/{room_id}/messages"))
        .add_header(name, value)
        .json(&json!({ "content": "hello there" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let message: Value = response.json();
    assert_eq!(message["content"], "hello there");
    assert_eq!(message["sender"]["username"], "alice");

    let (name, value) = auth_header(&user);
    let response = server
        .get(&format!("/api/rooms/{room_id}/messages"))
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::OK);
    let messages: Value = response.json();
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["content"], "hello there");
}

#[tokio::test]
async fn non_participant_cannot_post_and_sees_no_messages() {
    let (server, _db) = test_server().await;
    let alice = signup_user(&server, "alice").await;
    let bob = signup_user(&server, "bob").await;

    let (name, value) = auth_header(&alice);
    let room: Value = server
        .post("/api/rooms")
        .add_header(name, value)
        .json(&json!({ "name": "general" }))
        .await
        .json();
    let room_id = room["id"].as_i64().unwrap();

    let (name, value) = auth_header(&alice);
    server
        .post(&format!("/api/rooms/{room_id}/messages"))
        .add_header(name, value)
        .json(&json!({ "content": "members only" }))
        .await
        .assert_status(StatusCode::CREATED);

    let (name, value) = auth_header(&bob);
    let response = server
        .post(&format!("/api/rooms/{room_id}/messages"))
        .add_header(name, value)
        .json(&json!({ "content": "let me in" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let (name, value) = auth_header(&bob);
    let response = server
        .get(&format!("/api/rooms/{room_id}/messages"))
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::OK);
    assert!(response.json::<Value>().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn message_post_rejects_blank_content() {
    let (server, _db) = test_server().await;
    let user = signup_user(&server, "alice").await;

    let (name, value) = auth_header(&user);
    let room: Value = server
        .post("/api/rooms")
        .add_header(name, value)
        .json(&json!({ "name": "general" }))
        .await
        .json();
    let room_id = room["id"].as_i64().unwrap();

    let (name, value) = auth_header(&user);
    let response = server
        .post(&format!("/api/rooms/{room_id}/messages"))
        .add_header(name, value)
        .json(&json!({ "content": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_routes_require_authentication() {
    let (server, _db) = test_server().await;

    let response = server.get("/api/rooms").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
