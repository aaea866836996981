use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    #[default]
    Freelancer,
    Vendor,
    Organization,
}

/// Seniority ladder shared by profiles and project requirements.
/// Ordered so `Entry < Intermediate < Senior < Expert`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    #[default]
    Intermediate,
    Senior,
    Expert,
}

impl ExperienceLevel {
    /// Numeric rank on the 1–4 scale used by the experience scorer.
    pub fn rank(self) -> u8 {
        match self {
            ExperienceLevel::Entry => 1,
            ExperienceLevel::Intermediate => 2,
            ExperienceLevel::Senior => 3,
            ExperienceLevel::Expert => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Expert => "expert",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    Busy,
    Unavailable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub level: ExperienceLevel,
    pub years: f64,
    pub industries: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub status: AvailabilityStatus,
    /// Percentage of working time free for new work, 0–100.
    pub capacity: f64,
    pub next_available: Option<NaiveDate>,
}

impl Availability {
    pub fn capacity_ratio(&self) -> f64 {
        (self.capacity / 100.0).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileLocation {
    pub country: Option<String>,
    pub city: Option<String>,
    pub timezone: Option<String>,
    pub accepts_remote: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub hourly_rate: Option<f64>,
    pub project_rate: Option<f64>,
    pub retainer_rate: Option<f64>,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProject {
    pub title: String,
    pub technologies: Vec<String>,
    pub industry: Option<String>,
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub projects: Vec<PortfolioProject>,
    /// Average client rating, 0–5.
    pub average_rating: f64,
    pub rating_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub verified: bool,
    pub badges: Vec<String>,
}

/// A provider profile as seen by the matching engine. Built only by
/// `records::parse_profile`, so every field already carries its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub user_type: UserType,
    pub display_name: String,
    pub skills: Vec<String>,
    pub experience: Experience,
    pub availability: Availability,
    pub location: ProfileLocation,
    pub pricing: Pricing,
    pub portfolio: Portfolio,
    pub verification: Verification,
    pub response_time_hours: f64,
    pub last_active: Option<DateTime<Utc>>,
}
