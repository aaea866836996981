use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::profile::Profile;
use crate::models::project::Project;

/// The eight scoring dimensions, in weight order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Skills,
    Experience,
    Availability,
    Budget,
    Location,
    Portfolio,
    ResponseTime,
    Verification,
}

impl Dimension {
    pub const ALL: [Dimension; 8] = [
        Dimension::Skills,
        Dimension::Experience,
        Dimension::Availability,
        Dimension::Budget,
        Dimension::Location,
        Dimension::Portfolio,
        Dimension::ResponseTime,
        Dimension::Verification,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Skills => "skills",
            Dimension::Experience => "experience",
            Dimension::Availability => "availability",
            Dimension::Budget => "budget",
            Dimension::Location => "location",
            Dimension::Portfolio => "portfolio",
            Dimension::ResponseTime => "response time",
            Dimension::Verification => "verification",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub experience: f64,
    pub availability: f64,
    pub budget: f64,
    pub location: f64,
    pub portfolio: f64,
    pub response_time: f64,
    pub verification: f64,
}

impl ScoreBreakdown {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Skills => self.skills,
            Dimension::Experience => self.experience,
            Dimension::Availability => self.availability,
            Dimension::Budget => self.budget,
            Dimension::Location => self.location,
            Dimension::Portfolio => self.portfolio,
            Dimension::ResponseTime => self.response_time,
            Dimension::Verification => self.verification,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

/// Which project skills a candidate covered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsDetail {
    pub required_ratio: f64,
    pub optional_ratio: f64,
    pub matched: Vec<String>,
    pub missing_required: Vec<String>,
}

impl SkillsDetail {
    pub fn covers_all_required(&self) -> bool {
        self.missing_required.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    /// Weighted overall score, 0.0 – 1.0, rounded to 2 decimals.
    pub overall: f64,
    pub breakdown: ScoreBreakdown,
    pub skills_detail: SkillsDetail,
    pub reasoning: Vec<String>,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
    Excellent,
}

impl ConfidenceTier {
    pub fn from_score(overall: f64) -> Self {
        if overall >= 0.8 {
            ConfidenceTier::Excellent
        } else if overall >= 0.6 {
            ConfidenceTier::High
        } else if overall >= 0.4 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfidenceTier::Low => "Low",
            ConfidenceTier::Medium => "Medium",
            ConfidenceTier::High => "High",
            ConfidenceTier::Excellent => "Excellent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    Reject,
    Consider,
    Recommend,
    HighlyRecommend,
}

impl RecommendationTier {
    pub fn from_score(overall: f64) -> Self {
        if overall >= 0.8 {
            RecommendationTier::HighlyRecommend
        } else if overall >= 0.6 {
            RecommendationTier::Recommend
        } else if overall >= 0.4 {
            RecommendationTier::Consider
        } else {
            RecommendationTier::Reject
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
}

impl CompetitionLevel {
    /// Buckets a 0-based position within a sorted pool of `pool_size` candidates.
    pub fn from_position(position: usize, pool_size: usize) -> Self {
        if pool_size == 0 {
            return CompetitionLevel::Low;
        }
        let fraction = position as f64 / pool_size as f64;
        if fraction < 0.1 {
            CompetitionLevel::Low
        } else if fraction < 0.3 {
            CompetitionLevel::Medium
        } else {
            CompetitionLevel::High
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMatch {
    pub profile: Profile,
    pub project: Project,
    pub score: MatchScore,
    pub rank: usize,
    pub confidence: ConfidenceTier,
    pub recommendation: RecommendationTier,
    pub insight_summary: String,
    pub estimated_success_rate: f64,
    pub competition_level: CompetitionLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMatch {
    pub project: Project,
    pub score: MatchScore,
    pub rank: usize,
    pub confidence: ConfidenceTier,
    pub recommendation: RecommendationTier,
    pub insight_summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSubject {
    Project,
    Profile,
}

/// Bookkeeping for one matching run. Handed to the persister with the results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRun {
    pub run_id: Uuid,
    pub subject: MatchSubject,
    pub subject_id: Uuid,
    pub as_of: DateTime<Utc>,
    pub candidates_considered: usize,
    pub candidates_scored: usize,
    pub results_returned: usize,
    /// True when the scoring deadline stopped the run before every batch ran.
    pub truncated: bool,
}

/// What the engine hands back to callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome<T> {
    pub run: MatchRun,
    pub matches: Vec<T>,
    /// Corrections applied to the caller's preferences.
    pub warnings: Vec<String>,
}
