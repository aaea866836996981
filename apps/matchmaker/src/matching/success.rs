//! Success-Rate Estimator: discounts the overall score, then nudges it with
//! historical quality signals.

use crate::models::matching::ScoreBreakdown;
use crate::models::profile::{ExperienceLevel, Profile};
use crate::models::project::{Complexity, Project};

const BASE_FACTOR: f64 = 0.7;

pub fn estimate_success_rate(
    overall: f64,
    breakdown: &ScoreBreakdown,
    profile: &Profile,
    project: &Project,
) -> f64 {
    let mut rate = overall * BASE_FACTOR;

    // Unrated profiles are neither rewarded nor penalised.
    if profile.portfolio.rating_count > 0 {
        let rating = profile.portfolio.average_rating;
        if rating > 4.5 {
            rate += 0.15;
        } else if rating < 3.5 {
            rate -= 0.1;
        }
    }

    if breakdown.experience > 0.9 {
        rate += 0.1;
    }
    if profile.verification.verified {
        rate += 0.05;
    }
    if project.complexity == Complexity::Enterprise
        && profile.experience.level != ExperienceLevel::Expert
    {
        rate -= 0.15;
    }

    rate.clamp(0.0, 1.0)
}
