use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::profile::ExperienceLevel;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequirement {
    pub name: String,
    pub level: ExperienceLevel,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetType {
    Hourly,
    #[default]
    Fixed,
    Retainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub min: f64,
    pub max: f64,
    pub currency: String,
    pub budget_type: BudgetType,
}

impl Budget {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub duration_days: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    #[default]
    Remote,
    Onsite,
    Hybrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLocation {
    pub location_type: LocationType,
    /// Countries a non-remote project accepts providers from. Empty = no constraint.
    pub countries: Vec<String>,
    pub city: Option<String>,
    pub timezone: Option<String>,
}

impl ProjectLocation {
    pub fn is_remote(&self) -> bool {
        self.location_type == LocationType::Remote
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    #[default]
    Moderate,
    Complex,
    Enterprise,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponsiveness {
    pub expected_response_hours: f64,
}

/// A project requirement snapshot. Built only by `records::parse_project`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub skills: Vec<SkillRequirement>,
    pub budget: Budget,
    pub timeline: Timeline,
    pub location: ProjectLocation,
    pub industry: Option<String>,
    pub complexity: Complexity,
    pub min_experience_years: f64,
    pub preferred_level: ExperienceLevel,
    pub client: ClientResponsiveness,
}

impl Project {
    pub fn required_skills(&self) -> impl Iterator<Item = &SkillRequirement> {
        self.skills.iter().filter(|s| s.required)
    }

    pub fn optional_skills(&self) -> impl Iterator<Item = &SkillRequirement> {
        self.skills.iter().filter(|s| !s.required)
    }
}
