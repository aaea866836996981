pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route(
            "/api/v1/projects/:id/matches",
            post(handlers::handle_project_matches),
        )
        .route(
            "/api/v1/profiles/:id/projects",
            post(handlers::handle_profile_projects),
        )
        .with_state(state)
}
