use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and the matching limits this instance runs with.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "matching": {
            "projectPoolLimit": config.project_pool_limit,
            "profilePoolLimit": config.profile_pool_limit,
            "batchSize": config.batch_size,
            "deadlineMs": config.deadline.map(|d| d.as_millis() as u64),
            "skillMatchMode": config.skill_match_mode,
            "persistMatches": config.persist_matches
        }
    }))
}
