//! Dimension scorers. Each one is pure and total: any parsed profile/project pair
//! yields a value in [0.0, 1.0]. The skills scorer lives in `skills.rs`.

use chrono::NaiveDate;

use crate::matching::skills::SkillMatchMode;
use crate::models::profile::{AvailabilityStatus, Profile};
use crate::models::project::{BudgetType, Project};

/// Neutral score used when one side carries no information for a dimension.
pub const NEUTRAL: f64 = 0.5;

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

/// Years against the project minimum, plus level against the preferred level.
///
/// - years ≥ minimum → +0.5, and +0.2 more at ≥ 1.5× minimum
/// - years < minimum → −0.3
/// - level → up to +0.5, proportional to `profile_rank / required_rank`
pub fn score_experience(profile: &Profile, project: &Project) -> f64 {
    let years = profile.experience.years;
    let minimum = project.min_experience_years;

    let mut score = if years >= minimum {
        if years >= minimum * 1.5 {
            0.7
        } else {
            0.5
        }
    } else {
        -0.3
    };

    let have = f64::from(profile.experience.level.rank());
    let want = f64::from(project.preferred_level.rank());
    score += 0.5 * (have / want).min(1.0);

    score.clamp(0.0, 1.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Availability
// ────────────────────────────────────────────────────────────────────────────

pub fn score_availability(profile: &Profile, project: &Project, as_of: NaiveDate) -> f64 {
    let availability = &profile.availability;
    let capacity = availability.capacity_ratio();

    match availability.status {
        AvailabilityStatus::Unavailable => return 0.0,
        AvailabilityStatus::Busy if capacity < 0.3 => return 0.2,
        _ => {}
    }

    let mut score: f64 = 0.5;
    score += if capacity >= 0.8 {
        0.3
    } else if capacity >= 0.5 {
        0.2
    } else {
        0.1
    };

    let available_now = availability.next_available.map_or(true, |d| d <= as_of);
    let ready_by_start = match (availability.next_available, project.timeline.start) {
        (Some(next), Some(start)) => next <= start,
        _ => false,
    };
    score += if available_now || ready_by_start { 0.2 } else { -0.1 };

    score.clamp(0.0, 1.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Budget
// ────────────────────────────────────────────────────────────────────────────

/// The profile rate that is comparable with the project's budget type.
pub fn comparable_rate(profile: &Profile, project: &Project) -> Option<f64> {
    match project.budget.budget_type {
        BudgetType::Hourly => profile.pricing.hourly_rate,
        BudgetType::Fixed => profile.pricing.project_rate,
        BudgetType::Retainer => profile.pricing.retainer_rate,
    }
}

/// Relative deviation of the comparable rate from the budget midpoint, bucketed.
pub fn score_budget(profile: &Profile, project: &Project) -> f64 {
    let Some(rate) = comparable_rate(profile, project) else {
        return NEUTRAL;
    };
    let midpoint = project.budget.midpoint();
    if midpoint <= 0.0 {
        return NEUTRAL;
    }

    let deviation = (rate - midpoint).abs() / midpoint;
    if deviation <= 0.1 {
        1.0
    } else if deviation <= 0.2 {
        0.8
    } else if deviation <= 0.4 {
        0.6
    } else if deviation <= 0.6 {
        0.4
    } else {
        0.2
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Location
// ────────────────────────────────────────────────────────────────────────────

const COUNTRY_POINTS: f64 = 0.6;
const CITY_POINTS: f64 = 0.4;
const TIMEZONE_POINTS: f64 = 0.2;

/// Remote projects always score 1.0. Otherwise country, city and timezone
/// agreement add up; a constraint the project does not set counts as met.
pub fn score_location(profile: &Profile, project: &Project) -> f64 {
    let wanted = &project.location;
    if wanted.is_remote() {
        return 1.0;
    }
    let have = &profile.location;

    let country_ok = wanted.countries.is_empty()
        || have
            .country
            .as_deref()
            .is_some_and(|c| wanted.countries.iter().any(|w| w.eq_ignore_ascii_case(c)));
    let city_ok = same_or_unconstrained(wanted.city.as_deref(), have.city.as_deref());
    let timezone_ok = same_or_unconstrained(wanted.timezone.as_deref(), have.timezone.as_deref());

    let mut score = 0.0;
    if country_ok {
        score += COUNTRY_POINTS;
    }
    if city_ok {
        score += CITY_POINTS;
    }
    if timezone_ok {
        score += TIMEZONE_POINTS;
    }
    score.min(1.0)
}

fn same_or_unconstrained(wanted: Option<&str>, have: Option<&str>) -> bool {
    match (wanted, have) {
        (None, _) => true,
        (Some(w), Some(h)) => w.trim().eq_ignore_ascii_case(h.trim()),
        (Some(_), None) => false,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Portfolio
// ────────────────────────────────────────────────────────────────────────────

const EMPTY_PORTFOLIO: f64 = 0.3;
const RELEVANCE_WINDOW: usize = 5;
const SEASONED_PORTFOLIO_SIZE: f64 = 10.0;

/// `0.5·relevance + 0.3·rating + 0.2·experience`.
///
/// A past project is relevant when it shares the project's industry or uses a
/// technology that matches one of the project's skills.
pub fn score_portfolio(profile: &Profile, project: &Project, mode: SkillMatchMode) -> f64 {
    let past = &profile.portfolio.projects;
    if past.is_empty() {
        return EMPTY_PORTFOLIO;
    }

    let relevant = past
        .iter()
        .filter(|p| {
            let same_industry = match (&p.industry, &project.industry) {
                (Some(a), Some(b)) => a.trim().eq_ignore_ascii_case(b.trim()),
                _ => false,
            };
            same_industry
                || project
                    .skills
                    .iter()
                    .any(|s| mode.matches_any(&s.name, &p.technologies))
        })
        .count();

    let relevance = (relevant as f64 / past.len().min(RELEVANCE_WINDOW) as f64).min(1.0);
    let rating = (profile.portfolio.average_rating / 5.0).clamp(0.0, 1.0);
    let experience = (past.len() as f64 / SEASONED_PORTFOLIO_SIZE).min(1.0);

    (0.5 * relevance + 0.3 * rating + 0.2 * experience).clamp(0.0, 1.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Response time & verification
// ────────────────────────────────────────────────────────────────────────────

pub fn score_response_time(profile: &Profile, project: &Project) -> f64 {
    let expected = project.client.expected_response_hours;
    let actual = profile.response_time_hours;
    if actual <= expected {
        return 1.0;
    }
    (expected / actual).clamp(0.0, 1.0)
}

pub fn score_verification(profile: &Profile) -> f64 {
    let base = if profile.verification.verified { 0.5 } else { 0.0 };
    let badges = (profile.verification.badges.len() as f64 * 0.1).min(0.5);
    (base + badges).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::test_support::{as_of, date, profile_with, project_with};
    use crate::models::profile::{ExperienceLevel, PortfolioProject};
    use crate::models::project::LocationType;

    fn today() -> NaiveDate {
        as_of().date_naive()
    }

    fn past_project(industry: Option<&str>, tech: &[&str]) -> PortfolioProject {
        PortfolioProject {
            title: "past".to_string(),
            technologies: tech.iter().map(|t| t.to_string()).collect(),
            industry: industry.map(str::to_string),
            budget: None,
        }
    }

    // ── experience ──

    #[test]
    fn test_experience_well_above_minimum_at_level() {
        // 6y vs 3y min (≥1.5×) → 0.7, senior vs senior → +0.5 → clamped 1.0
        let score = score_experience(&profile_with(|_| {}), &project_with(|_| {}));
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_experience_meets_minimum_only() {
        let profile = profile_with(|p| p.experience.years = 4.0);
        let project = project_with(|p| p.preferred_level = ExperienceLevel::Expert);
        // 0.5 + 0.5 * 3/4
        let score = score_experience(&profile, &project);
        assert!((score - 0.875).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_experience_below_minimum_is_penalised() {
        let profile = profile_with(|p| {
            p.experience.years = 1.0;
            p.experience.level = ExperienceLevel::Entry;
        });
        let project = project_with(|p| p.preferred_level = ExperienceLevel::Expert);
        // -0.3 + 0.5 * 1/4 = -0.175 → 0.0
        assert_eq!(score_experience(&profile, &project), 0.0);
    }

    // ── availability ──

    #[test]
    fn test_unavailable_is_zero_regardless_of_capacity() {
        let profile = profile_with(|p| {
            p.availability.status = AvailabilityStatus::Unavailable;
            p.availability.capacity = 100.0;
        });
        assert_eq!(score_availability(&profile, &project_with(|_| {}), today()), 0.0);
    }

    #[test]
    fn test_busy_with_low_capacity() {
        let profile = profile_with(|p| {
            p.availability.status = AvailabilityStatus::Busy;
            p.availability.capacity = 20.0;
        });
        assert_eq!(score_availability(&profile, &project_with(|_| {}), today()), 0.2);
    }

    #[test]
    fn test_free_now_full_capacity_is_one() {
        let score = score_availability(&profile_with(|_| {}), &project_with(|_| {}), today());
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_free_before_project_start() {
        let profile = profile_with(|p| {
            p.availability.capacity = 60.0;
            p.availability.next_available = Some(date(2026, 11, 15));
        });
        // 0.5 + 0.2 (capacity) + 0.2 (ready by 2026-12-01)
        let score = score_availability(&profile, &project_with(|_| {}), today());
        assert!((score - 0.9).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_free_after_project_start() {
        let profile = profile_with(|p| {
            p.availability.capacity = 40.0;
            p.availability.next_available = Some(date(2027, 2, 1));
        });
        // 0.5 + 0.1 - 0.1
        let score = score_availability(&profile, &project_with(|_| {}), today());
        assert!((score - 0.5).abs() < 1e-9, "got {score}");
    }

    // ── budget ──

    #[test]
    fn test_rate_at_midpoint_scores_full() {
        let score = score_budget(&profile_with(|_| {}), &project_with(|_| {}));
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_budget_buckets() {
        let project = project_with(|_| {});
        let cases = [(88.0, 0.8), (100.0, 0.6), (50.0, 0.6), (115.0, 0.4), (200.0, 0.2)];
        for (rate, expected) in cases {
            let profile = profile_with(|p| p.pricing.hourly_rate = Some(rate));
            assert_eq!(score_budget(&profile, &project), expected, "rate {rate}");
        }
    }

    #[test]
    fn test_missing_rate_is_neutral() {
        let project = project_with(|p| p.budget.budget_type = BudgetType::Retainer);
        assert_eq!(score_budget(&profile_with(|_| {}), &project), NEUTRAL);
    }

    #[test]
    fn test_zero_budget_is_neutral() {
        let project = project_with(|p| {
            p.budget.min = 0.0;
            p.budget.max = 0.0;
        });
        assert_eq!(score_budget(&profile_with(|_| {}), &project), NEUTRAL);
    }

    // ── location ──

    #[test]
    fn test_remote_project_is_full_location_score() {
        let profile = profile_with(|p| p.location.country = Some("Brazil".to_string()));
        assert_eq!(score_location(&profile, &project_with(|_| {})), 1.0);
    }

    #[test]
    fn test_onsite_country_match_only() {
        let project = project_with(|p| {
            p.location.location_type = LocationType::Onsite;
            p.location.countries = vec!["us".to_string()];
            p.location.city = Some("Chicago".to_string());
            p.location.timezone = Some("America/Chicago".to_string());
        });
        let score = score_location(&profile_with(|_| {}), &project);
        assert!((score - 0.6).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_onsite_no_overlap_is_zero() {
        let project = project_with(|p| {
            p.location.location_type = LocationType::Hybrid;
            p.location.countries = vec!["DE".to_string()];
            p.location.city = Some("Berlin".to_string());
            p.location.timezone = Some("Europe/Berlin".to_string());
        });
        assert_eq!(score_location(&profile_with(|_| {}), &project), 0.0);
    }

    #[test]
    fn test_onsite_everything_matches_is_capped() {
        let project = project_with(|p| {
            p.location.location_type = LocationType::Onsite;
            p.location.countries = vec!["US".to_string()];
            p.location.city = Some("new york".to_string());
            p.location.timezone = Some("America/New_York".to_string());
        });
        assert_eq!(score_location(&profile_with(|_| {}), &project), 1.0);
    }

    // ── portfolio ──

    #[test]
    fn test_empty_portfolio() {
        let score = score_portfolio(&profile_with(|_| {}), &project_with(|_| {}), SkillMatchMode::Substring);
        assert_eq!(score, 0.3);
    }

    #[test]
    fn test_portfolio_relevance_rating_and_size() {
        let profile = profile_with(|p| {
            p.portfolio.projects = vec![
                past_project(Some("Fintech"), &[]),
                past_project(None, &["Rust", "Postgres"]),
                past_project(Some("retail"), &["php"]),
                past_project(None, &[]),
            ];
            p.portfolio.average_rating = 4.0;
            p.portfolio.rating_count = 12;
        });
        // relevance 2/4, rating 0.8, experience 0.4
        // 0.25 + 0.24 + 0.08 = 0.57
        let score = score_portfolio(&profile, &project_with(|_| {}), SkillMatchMode::Substring);
        assert!((score - 0.57).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_portfolio_relevance_window_caps_at_one() {
        let profile = profile_with(|p| {
            p.portfolio.projects = (0..12).map(|_| past_project(Some("fintech"), &[])).collect();
            p.portfolio.average_rating = 5.0;
        });
        let score = score_portfolio(&profile, &project_with(|_| {}), SkillMatchMode::Substring);
        assert!((score - 1.0).abs() < 1e-9, "got {score}");
    }

    // ── response time / verification ──

    #[test]
    fn test_response_time_within_expectation() {
        assert_eq!(score_response_time(&profile_with(|_| {}), &project_with(|_| {})), 1.0);
    }

    #[test]
    fn test_response_time_slower_than_expected() {
        let profile = profile_with(|p| p.response_time_hours = 48.0);
        assert_eq!(score_response_time(&profile, &project_with(|_| {})), 0.5);
    }

    #[test]
    fn test_verification_badges_capped() {
        let unverified = profile_with(|_| {});
        assert_eq!(score_verification(&unverified), 0.0);

        let verified = profile_with(|p| {
            p.verification.verified = true;
            p.verification.badges = vec!["id".to_string(), "tax".to_string()];
        });
        assert!((score_verification(&verified) - 0.7).abs() < 1e-9);

        let decorated = profile_with(|p| {
            p.verification.verified = true;
            p.verification.badges = (0..9).map(|i| format!("badge-{i}")).collect();
        });
        assert_eq!(score_verification(&decorated), 1.0);
    }
}
