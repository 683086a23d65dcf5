/**
 * Router Configuration
 *
 * This module assembles the Axum router from all route groups.
 *
 * # Route Layout
 *
 * Public routes:
 * - `POST /api/auth/signup` - user registration
 * - `POST /api/auth/signin` - credential check and token issuance
 *
 * Protected routes (behind the token middleware):
 * - `GET  /api/auth/me` - current user
 * - `GET|POST /api/topics`, `GET|PUT|DELETE /api/topics/{id}`
 * - `GET|POST /api/roadmaps`, `POST /api/roadmaps/generate`,
 *   `GET|PUT|DELETE /api/roadmaps/{id}`
 * - `GET|POST /api/steps`, `GET|PUT|DELETE /api/steps/{id}`
 * - `GET|POST /api/resources`, `GET|PUT|DELETE /api/resources/{id}`
 * - `GET|POST /api/rooms`, `GET|POST /api/rooms/{id}/messages`
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::auth::handlers::{me, signin, signup};
use crate::chat::handlers as chat;
use crate::middleware::auth::auth_middleware;
use crate::roadmap::handlers as roadmap;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `state` - Application state (database pool)
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/signin", post(signin));

    let protected = Router::new()
        .route("/api/auth/me", get(me))
        .route(
            "/api/topics",
            get(roadmap::list_topics).post(roadmap::create_topic),
        )
        .route(
            "/api/topics/{id}",
            get(roadmap::get_topic)
                .put(roadmap::update_topic)
                .delete(roadmap::delete_topic),
        )
        .route(
            "/api/roadmaps",
            get(roadmap::list_roadmaps).post(roadmap::create_roadmap),
        )
        .route("/api/roadmaps/generate", post(roadmap::generate_roadmap))
        .route(
            "/api/roadmaps/{id}",
            get(roadmap::get_roadmap)
                .put(roadmap::update_roadmap)
                .delete(roadmap::delete_roadmap),
        )
        .route(
            "/api/steps",
            get(roadmap::list_steps).post(roadmap::create_step),
        )
        .route(
            "/api/steps/{id}",
            get(roadmap::get_step)
                .put(roadmap::update_step)
                .delete(roadmap::delete_step),
        )
        .route(
            "/api/resources",
            get(roadmap::list_resources).post(roadmap::create_resource),
        )
        .route(
            "/api/resources/{id}",
            get(roadmap::get_resource)
                .put(roadmap::update_resource)
                .delete(roadmap::delete_resource),
        )
        .route("/api/rooms", get(chat::list_rooms).post(chat::create_room))
        .route(
            "/api/rooms/{id}/messages",
            get(chat::list_messages).post(chat::create_message),
        )
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    public.merge(protected).with_state(state)
}
