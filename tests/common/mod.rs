//! Shared test infrastructure
//!
//! Provides the in-memory test database and authentication helpers used
//! across the integration suites.

pub mod auth_helpers;
pub mod database;

use axum_test::TestServer;

use database::TestDatabase;

/// Spin up a test server over a fresh in-memory database
pub async fn test_server() -> (TestServer, TestDatabase) {
    let db = TestDatabase::new().await;
    let app = researchpath::server::init::create_app_with_pool(db.pool().clone());
    let server = TestServer::new(app).expect("failed to start test server");
    (server, db)
}
