//! Ranker/Filter: the join point after all candidates are scored.
//!
//! Filter → Sort → Truncate → Re-rank. Competition level is taken from the
//! candidate's position in the full scored pool, before any filter runs.

use std::cmp::Ordering;

use crate::matching::insights::summarize;
use crate::matching::preferences::EffectivePreferences;
use crate::matching::success::estimate_success_rate;
use crate::models::matching::{
    CompetitionLevel, ConfidenceTier, MatchScore, ProfileMatch, ProjectMatch, RecommendationTier,
};
use crate::models::profile::Profile;
use crate::models::project::Project;

/// A profile that survived eligibility and has been scored against the project.
#[derive(Debug, Clone)]
pub struct ScoredProfile {
    pub profile: Profile,
    pub score: MatchScore,
}

#[derive(Debug, Clone)]
pub struct ScoredProject {
    pub project: Project,
    pub score: MatchScore,
}

/// Highest overall first; ties broken by id so the order is total and repeatable.
fn by_score_then_id(a: (&MatchScore, uuid::Uuid), b: (&MatchScore, uuid::Uuid)) -> Ordering {
    b.0.overall
        .total_cmp(&a.0.overall)
        .then_with(|| a.1.cmp(&b.1))
}

fn passes_common_filters(score: &MatchScore, prefs: &EffectivePreferences) -> bool {
    score.overall >= prefs.minimum_score
        && (prefs.include_partial_matches || score.skills_detail.covers_all_required())
}

pub fn rank_profiles(
    project: &Project,
    mut scored: Vec<ScoredProfile>,
    prefs: &EffectivePreferences,
) -> Vec<ProfileMatch> {
    scored.sort_by(|a, b| by_score_then_id((&a.score, a.profile.id), (&b.score, b.profile.id)));
    let pool_size = scored.len();

    scored
        .into_iter()
        .enumerate()
        .filter(|(_, c)| {
            passes_common_filters(&c.score, prefs)
                && !prefs.exclude_profiles.contains(&c.profile.id)
                && (!prefs.require_verification || c.profile.verification.verified)
        })
        .take(prefs.max_results)
        .enumerate()
        .map(|(i, (position, c))| {
            let overall = c.score.overall;
            let confidence = ConfidenceTier::from_score(overall);
            let recommendation = RecommendationTier::from_score(overall);
            let estimated_success_rate =
                estimate_success_rate(overall, &c.score.breakdown, &c.profile, project);
            ProfileMatch {
                insight_summary: summarize(overall, confidence, recommendation),
                competition_level: CompetitionLevel::from_position(position, pool_size),
                profile: c.profile,
                project: project.clone(),
                score: c.score,
                rank: i + 1,
                confidence,
                recommendation,
                estimated_success_rate,
            }
        })
        .collect()
}

pub fn rank_projects(mut scored: Vec<ScoredProject>, prefs: &EffectivePreferences) -> Vec<ProjectMatch> {
    scored.sort_by(|a, b| by_score_then_id((&a.score, a.project.id), (&b.score, b.project.id)));

    scored
        .into_iter()
        .filter(|c| passes_common_filters(&c.score, prefs))
        .take(prefs.max_results)
        .enumerate()
        .map(|(i, c)| {
            let overall = c.score.overall;
            let confidence = ConfidenceTier::from_score(overall);
            let recommendation = RecommendationTier::from_score(overall);
            ProjectMatch {
                insight_summary: summarize(overall, confidence, recommendation),
                project: c.project,
                score: c.score,
                rank: i + 1,
                confidence,
                recommendation,
            }
        })
        .collect()
}
