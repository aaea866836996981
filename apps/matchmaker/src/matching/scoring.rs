//! Weighted Aggregator: runs the eight dimension scorers for one pair and folds
//! them into a `MatchScore`.

use chrono::{DateTime, Utc};

use crate::matching::dimensions::{
    score_availability, score_budget, score_experience, score_location, score_portfolio,
    score_response_time, score_verification,
};
use crate::matching::insights::annotate;
use crate::matching::skills::{score_skills, SkillMatchMode};
use crate::matching::weights::ScoringWeights;
use crate::models::matching::{MatchScore, ScoreBreakdown};
use crate::models::profile::Profile;
use crate::models::project::Project;

/// Everything a run fixes up front. Cheap to copy into worker tasks.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext {
    pub weights: ScoringWeights,
    pub mode: SkillMatchMode,
    /// The run's "now"; all date comparisons use this instead of the clock.
    pub as_of: DateTime<Utc>,
}

pub fn score_pair(profile: &Profile, project: &Project, ctx: &ScoringContext) -> MatchScore {
    let (skills, skills_detail) = score_skills(profile, project, ctx.mode);

    let breakdown = ScoreBreakdown {
        skills,
        experience: score_experience(profile, project),
        availability: score_availability(profile, project, ctx.as_of.date_naive()),
        budget: score_budget(profile, project),
        location: score_location(profile, project),
        portfolio: score_portfolio(profile, project, ctx.mode),
        response_time: score_response_time(profile, project),
        verification: score_verification(profile),
    };

    let mut score = MatchScore {
        overall: ctx.weights.combine(&breakdown),
        breakdown,
        skills_detail,
        reasoning: Vec::new(),
        strengths: Vec::new(),
        concerns: Vec::new(),
        recommendations: Vec::new(),
    };
    annotate(&mut score, profile, project);
    score
}
