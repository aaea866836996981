//! Insight Generator: deterministic, rule-based text over a score breakdown.
//!
//! No model call: every sentence comes from a threshold rule below, so two runs over
//! the same snapshots produce the same text.

use crate::matching::dimensions::comparable_rate;
use crate::models::matching::{
    ConfidenceTier, Dimension, MatchScore, RecommendationTier, ScoreBreakdown, SkillsDetail,
};
use crate::models::profile::Profile;
use crate::models::project::Project;

const STRENGTH_THRESHOLD: f64 = 0.8;
const BUDGET_CONCERN: f64 = 0.5;
const AVAILABILITY_CONCERN: f64 = 0.6;
const LOCATION_CONCERN: f64 = 0.4;

/// Fills reasoning, strengths, concerns and recommendations on a fresh score.
pub fn annotate(score: &mut MatchScore, profile: &Profile, project: &Project) {
    score.strengths = strengths(&score.breakdown);
    score.concerns = concerns(&score.breakdown, &score.skills_detail, project);
    score.reasoning = reasoning(profile, project, &score.breakdown, &score.skills_detail);
    score.recommendations = recommendations(&score.breakdown, &score.skills_detail, profile);
}

pub fn strengths(breakdown: &ScoreBreakdown) -> Vec<String> {
    breakdown
        .iter()
        .filter(|(_, score)| *score > STRENGTH_THRESHOLD)
        .map(|(d, _)| format!("Excellent {} match", d.label()))
        .collect()
}

pub fn concerns(breakdown: &ScoreBreakdown, skills: &SkillsDetail, project: &Project) -> Vec<String> {
    let mut concerns = Vec::new();

    if !skills.missing_required.is_empty() {
        concerns.push(format!(
            "Missing required skills: {}",
            skills.missing_required.join(", ")
        ));
    }
    if breakdown.budget < BUDGET_CONCERN {
        concerns.push("Budget expectations may not align with the project budget".to_string());
    }
    if breakdown.availability < AVAILABILITY_CONCERN {
        concerns.push("Limited availability for the project timeline".to_string());
    }
    if breakdown.location < LOCATION_CONCERN && !project.location.is_remote() {
        concerns.push("Location may not suit on-site or hybrid work".to_string());
    }

    concerns
}

/// One evidence line per dimension.
pub fn reasoning(
    profile: &Profile,
    project: &Project,
    breakdown: &ScoreBreakdown,
    skills: &SkillsDetail,
) -> Vec<String> {
    let total_skills = project.skills.len();
    let mut lines = Vec::with_capacity(Dimension::ALL.len());

    lines.push(if total_skills == 0 {
        "Project lists no specific skills".to_string()
    } else {
        format!(
            "Matches {} of {} project skills ({:.0}% of required)",
            skills.matched.len(),
            total_skills,
            skills.required_ratio * 100.0
        )
    });

    lines.push(format!(
        "{} years of experience at {} level (project asks for {} years, {} level)",
        trim_float(profile.experience.years),
        profile.experience.level.as_str(),
        trim_float(project.min_experience_years),
        project.preferred_level.as_str()
    ));

    lines.push(format!(
        "{:.0}% capacity, availability score {:.2}",
        profile.availability.capacity, breakdown.availability
    ));

    lines.push(match comparable_rate(profile, project) {
        Some(rate) => format!(
            "Rate {} {} against a {}–{} budget",
            trim_float(rate),
            profile.pricing.currency,
            trim_float(project.budget.min),
            trim_float(project.budget.max)
        ),
        None => "No comparable rate published for this budget type".to_string(),
    });

    lines.push(if project.location.is_remote() {
        "Remote project, location is not a constraint".to_string()
    } else {
        format!("On-site/hybrid location score {:.2}", breakdown.location)
    });

    lines.push(format!(
        "{} portfolio projects, average rating {:.1}",
        profile.portfolio.projects.len(),
        profile.portfolio.average_rating
    ));

    lines.push(format!(
        "Typically responds within {} hours (client expects {})",
        trim_float(profile.response_time_hours),
        trim_float(project.client.expected_response_hours)
    ));

    lines.push(if profile.verification.verified {
        format!(
            "Verified provider with {} badge(s)",
            profile.verification.badges.len()
        )
    } else {
        "Provider is not verified".to_string()
    });

    lines
}

pub fn recommendations(breakdown: &ScoreBreakdown, skills: &SkillsDetail, profile: &Profile) -> Vec<String> {
    let mut out = Vec::new();

    if !skills.missing_required.is_empty() {
        out.push(format!(
            "Ask about {} during the interview",
            skills.missing_required.join(", ")
        ));
    }
    if breakdown.budget < BUDGET_CONCERN {
        out.push("Discuss rate expectations before sending an offer".to_string());
    }
    if breakdown.availability < AVAILABILITY_CONCERN {
        out.push("Confirm a realistic start date and weekly capacity".to_string());
    }
    if breakdown.response_time < 0.5 {
        out.push("Agree on a communication cadence up front".to_string());
    }
    if !profile.verification.verified {
        out.push("Request identity verification before contracting".to_string());
    }
    if out.is_empty() {
        out.push("Strong overall fit; proceed to a proposal".to_string());
    }

    out
}

/// One-line natural language summary, e.g.
/// "Excellent confidence match (85%): highly recommended for this project."
pub fn summarize(overall: f64, confidence: ConfidenceTier, recommendation: RecommendationTier) -> String {
    let verdict = match recommendation {
        RecommendationTier::HighlyRecommend => "highly recommended for this project",
        RecommendationTier::Recommend => "recommended for this project",
        RecommendationTier::Consider => "worth considering with some reservations",
        RecommendationTier::Reject => "not a good fit for this project",
    };
    format!(
        "{} confidence match ({:.0}%): {}.",
        confidence.label(),
        (overall * 100.0).round(),
        verdict
    )
}

fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
