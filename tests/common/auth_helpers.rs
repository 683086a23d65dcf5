//! Authentication test helpers
//!
//! Utilities for registering test users and attaching their tokens to
//! requests.

use axum_test::TestServer;
use serde_json::{json, Value};

/// A registered test user with their API token
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

impl TestUser {
    /// The Authorization header value for this user
    pub fn auth_header(&self) -> String {
        format!("Token {}", self.token)
    }
}

/// Register a user through the signup endpoint
pub async fn signup_user(server: &TestServer, username: &str) -> TestUser {
    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "password123",
        }))
        .await;

    assert_eq!(
        response.status_code().as_u16(),
        201,
        "signup failed: {}",
        response.text()
    );

    let body: Value = response.json();
    TestUser {
        id: body["user"]["id"].as_i64().expect("user id missing"),
        token: body["token"].as_str().expect("token missing").to_string(),
    }
}
