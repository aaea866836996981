//! Axum route handlers for the Matching API.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::preferences::MatchPreferences;
use crate::models::matching::{MatchOutcome, ProfileMatch, ProjectMatch};
use crate::state::AppState;

/// An empty body means "all defaults". Malformed JSON is rejected; out-of-range
/// values are corrected later and reported as warnings.
fn parse_preferences(body: &Bytes) -> Result<MatchPreferences, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(MatchPreferences::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("invalid match preferences: {e}")))
}

/// POST /api/v1/projects/:id/matches
///
/// Ranks candidate profiles for a project.
pub async fn handle_project_matches(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<MatchOutcome<ProfileMatch>>, AppError> {
    let preferences = parse_preferences(&body)?;
    let outcome = state.engine.find_matches(project_id, &preferences).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/profiles/:id/projects
///
/// Ranks open projects for a profile.
pub async fn handle_profile_projects(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<MatchOutcome<ProjectMatch>>, AppError> {
    let preferences = parse_preferences(&body)?;
    let outcome = state
        .engine
        .find_projects_for_profile(profile_id, &preferences)
        .await?;
    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_body_means_defaults() {
        let prefs = parse_preferences(&Bytes::from_static(b"  \n")).unwrap();
        assert_eq!(prefs.max_results, 20);
    }

    #[test]
    fn test_malformed_body_is_a_validation_error() {
        let err = parse_preferences(&Bytes::from_static(b"{\"maxResults\": ")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
