pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{delete, get, post};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};

/// Build the axum Router with all API routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(root: PathBuf) -> Router {
    let app_state = state::AppState::new(root);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Overview
        .route("/api/overview", get(routes::overview::get_overview))
        // Members
        .route("/api/members", get(routes::members::list_members))
        .route("/api/members", post(routes::members::create_member))
        .route("/api/members/{slug}", get(routes::members::get_member))
        .route(
            "/api/members/{slug}/tier",
            post(routes::members::set_member_tier),
        )
        .route(
            "/api/members/{slug}/badges",
            get(routes::members::get_member_badges),
        )
        // Projects
        .route("/api/projects", get(routes::projects::list_projects))
        .route("/api/projects", post(routes::projects::create_project))
        .route("/api/projects/{slug}", get(routes::projects::get_project))
        .route(
            "/api/projects/{slug}/advance",
            post(routes::projects::advance_project),
        )
        .route(
            "/api/projects/{slug}/iterate",
            post(routes::projects::iterate_project),
        )
        // Queue
        .route("/api/queue", get(routes::queue::get_ranked_queue))
        .route("/api/queue", post(routes::queue::submit_to_queue))
        .route("/api/queue/{id}", delete(routes::queue::withdraw_from_queue))
        // Sessions
        .route("/api/sessions", get(routes::sessions::list_sessions))
        .route("/api/sessions", post(routes::sessions::create_session))
        .route(
            "/api/sessions/{id}/register",
            post(routes::sessions::register_player),
        )
        .route(
            "/api/sessions/{id}/complete",
            post(routes::sessions::complete_session),
        )
        .route(
            "/api/sessions/{id}/cancel",
            post(routes::sessions::cancel_session),
        )
        // Feedback
        .route("/api/feedback", get(routes::feedback::list_feedback))
        .route("/api/feedback", post(routes::feedback::create_feedback))
        // Leaderboard
        .route("/api/leaderboard", get(routes::leaderboard::get_leaderboard))
        .layer(cors)
        .with_state(app_state)
}

/// Start the API server on a pre-bound listener.
///
/// Accepts a `TcpListener` that was already bound so the caller can read
/// the actual port before starting (useful when `port = 0` and the OS
/// picks a free port).
pub async fn serve_on(root: PathBuf, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(root);

    tracing::info!("guild API listening on http://localhost:{actual_port}");

    axum::serve(listener, app).await?;
    Ok(())
}
