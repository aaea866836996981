//! Record Parser: turns raw documents from the profile/project stores into typed entities.
//!
//! Documents come from a schemaless store and drift over time: fields go missing,
//! switch between snake_case and camelCase, or carry out-of-range numbers. Every
//! optional field gets a named default here so scorers never see a gap.
//! The only hard failure is a document without a parseable identity.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::profile::{
    Availability, AvailabilityStatus, Experience, ExperienceLevel, Portfolio, PortfolioProject,
    Pricing, Profile, ProfileLocation, UserType, Verification,
};
use crate::models::project::{
    Budget, BudgetType, ClientResponsiveness, Complexity, LocationType, Project, ProjectLocation,
    SkillRequirement, Timeline,
};

pub const DEFAULT_CAPACITY: f64 = 100.0;
pub const DEFAULT_ACCEPTS_REMOTE: bool = true;
pub const DEFAULT_RESPONSE_TIME_HOURS: f64 = 24.0;
pub const DEFAULT_EXPECTED_RESPONSE_HOURS: f64 = 24.0;
pub const DEFAULT_CURRENCY: &str = "USD";
const MAX_RATING: f64 = 5.0;

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("record has no valid id")]
    MissingIdentity,
}

// ────────────────────────────────────────────────────────────────────────────
// Profiles
// ────────────────────────────────────────────────────────────────────────────

pub fn parse_profile(doc: &Value) -> Result<Profile, RecordError> {
    let id = parse_identity(doc)?;

    let experience = doc.get("experience").unwrap_or(&Value::Null);
    let availability = doc.get("availability").unwrap_or(&Value::Null);
    let location = doc.get("location").unwrap_or(&Value::Null);
    let pricing = doc.get("pricing").unwrap_or(&Value::Null);
    let portfolio = doc.get("portfolio").unwrap_or(&Value::Null);
    let verification = doc.get("verification").unwrap_or(&Value::Null);

    Ok(Profile {
        id,
        user_type: match get_tag(doc, &["user_type", "userType"]).as_deref() {
            Some("vendor") => UserType::Vendor,
            Some("organization") => UserType::Organization,
            _ => UserType::Freelancer,
        },
        display_name: get_str(doc, &["display_name", "displayName", "name"])
            .unwrap_or_default()
            .to_string(),
        skills: get_names(doc, &["skills"]),
        experience: Experience {
            level: parse_level(get_str(experience, &["level"])),
            years: non_negative(get_f64(experience, &["years"])),
            industries: get_names(experience, &["industries"]),
        },
        availability: Availability {
            status: match get_tag(availability, &["status"]).as_deref() {
                Some("busy") => AvailabilityStatus::Busy,
                Some("unavailable") => AvailabilityStatus::Unavailable,
                _ => AvailabilityStatus::Available,
            },
            capacity: get_f64(availability, &["capacity"])
                .unwrap_or(DEFAULT_CAPACITY)
                .clamp(0.0, 100.0),
            next_available: get_date(availability, &["next_available", "nextAvailable"]),
        },
        location: ProfileLocation {
            country: get_string(location, &["country"]),
            city: get_string(location, &["city"]),
            timezone: get_string(location, &["timezone"]),
            accepts_remote: get_bool(location, &["remote", "accepts_remote", "acceptsRemote"])
                .unwrap_or(DEFAULT_ACCEPTS_REMOTE),
        },
        pricing: Pricing {
            hourly_rate: positive(get_f64(pricing, &["hourly_rate", "hourlyRate"])),
            project_rate: positive(get_f64(pricing, &["project_rate", "projectRate"])),
            retainer_rate: positive(get_f64(pricing, &["retainer_rate", "retainerRate"])),
            currency: get_string(pricing, &["currency"])
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        },
        portfolio: Portfolio {
            projects: get_array(portfolio, &["projects"])
                .iter()
                .map(parse_portfolio_project)
                .collect(),
            average_rating: non_negative(get_f64(
                portfolio,
                &["rating", "average_rating", "averageRating"],
            ))
            .min(MAX_RATING),
            rating_count: get_f64(portfolio, &["rating_count", "ratingCount", "review_count"])
                .map(|n| n.max(0.0) as u32)
                .unwrap_or(0),
        },
        verification: Verification {
            verified: get_bool(verification, &["verified", "is_verified", "isVerified"])
                .unwrap_or(false),
            badges: get_names(verification, &["badges"]),
        },
        response_time_hours: get_f64(
            doc,
            &["response_time", "responseTime", "response_time_hours"],
        )
        .map(|h| h.max(0.0))
        .unwrap_or(DEFAULT_RESPONSE_TIME_HOURS),
        last_active: get_datetime(doc, &["last_active", "lastActive"]),
    })
}

fn parse_portfolio_project(doc: &Value) -> PortfolioProject {
    PortfolioProject {
        title: get_str(doc, &["title", "name"]).unwrap_or_default().to_string(),
        technologies: get_names(doc, &["technologies", "tech_stack", "techStack"]),
        industry: get_string(doc, &["industry"]),
        budget: positive(get_f64(doc, &["budget"])),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

pub fn parse_project(doc: &Value) -> Result<Project, RecordError> {
    let id = parse_identity(doc)?;

    let budget = doc.get("budget").unwrap_or(&Value::Null);
    let timeline = doc.get("timeline").unwrap_or(&Value::Null);
    let location = doc.get("location").unwrap_or(&Value::Null);
    let client = get_value(doc, &["client", "client_responsiveness", "clientResponsiveness"])
        .unwrap_or(&Value::Null);

    let mut min = non_negative(get_f64(budget, &["min"]));
    let mut max = non_negative(get_f64(budget, &["max"]));
    if max < min {
        std::mem::swap(&mut min, &mut max);
    }

    // A single "country" string and a "countries" list are both seen in the store.
    let mut countries = get_names(location, &["countries"]);
    if let Some(country) = get_string(location, &["country"]) {
        countries.push(country);
    }

    Ok(Project {
        id,
        title: get_str(doc, &["title"]).unwrap_or_default().to_string(),
        description: get_str(doc, &["description"]).unwrap_or_default().to_string(),
        skills: get_array(doc, &["skills", "required_skills", "requiredSkills"])
            .iter()
            .filter_map(parse_skill_requirement)
            .collect(),
        budget: Budget {
            min,
            max,
            currency: get_string(budget, &["currency"])
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            budget_type: match get_tag(budget, &["type", "budget_type", "budgetType"]).as_deref() {
                Some("hourly") => BudgetType::Hourly,
                Some("retainer") => BudgetType::Retainer,
                _ => BudgetType::Fixed,
            },
        },
        timeline: Timeline {
            start: get_date(timeline, &["start", "start_date", "startDate"]),
            end: get_date(timeline, &["end", "end_date", "endDate"]),
            duration_days: get_f64(timeline, &["duration", "duration_days", "durationDays"])
                .filter(|d| *d > 0.0)
                .map(|d| d as u32),
        },
        location: ProjectLocation {
            location_type: match get_tag(location, &["type", "location_type", "locationType"]).as_deref() {
                Some("onsite") | Some("on_site") | Some("on-site") => LocationType::Onsite,
                Some("hybrid") => LocationType::Hybrid,
                _ => LocationType::Remote,
            },
            countries,
            city: get_string(location, &["city"]),
            timezone: get_string(location, &["timezone"]),
        },
        industry: get_string(doc, &["industry"]),
        complexity: match get_tag(doc, &["complexity"]).as_deref() {
            Some("simple") => Complexity::Simple,
            Some("complex") => Complexity::Complex,
            Some("enterprise") => Complexity::Enterprise,
            _ => Complexity::Moderate,
        },
        min_experience_years: non_negative(get_f64(
            doc,
            &["min_experience_years", "minExperienceYears", "minimum_experience"],
        )),
        preferred_level: parse_level(get_str(
            doc,
            &["preferred_level", "preferredExperienceLevel", "experience_level"],
        )),
        client: ClientResponsiveness {
            expected_response_hours: positive(get_f64(
                client,
                &["expected_response_hours", "expectedResponseHours", "response_time"],
            ))
            .unwrap_or(DEFAULT_EXPECTED_RESPONSE_HOURS),
        },
    })
}

/// Skill entries are either plain strings (required, intermediate) or objects.
fn parse_skill_requirement(doc: &Value) -> Option<SkillRequirement> {
    let (name, level, required) = match doc {
        Value::String(s) => (s.as_str(), None, true),
        Value::Object(_) => (
            get_str(doc, &["name", "skill"])?,
            get_str(doc, &["level", "required_level", "requiredLevel"]),
            get_bool(doc, &["required", "is_required", "isRequired"]).unwrap_or(true),
        ),
        _ => return None,
    };
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(SkillRequirement {
        name: name.to_string(),
        level: parse_level(level),
        required,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Field helpers
// ────────────────────────────────────────────────────────────────────────────

fn parse_identity(doc: &Value) -> Result<Uuid, RecordError> {
    if !doc.is_object() {
        return Err(RecordError::NotAnObject);
    }
    get_str(doc, &["id", "_id"])
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
        .ok_or(RecordError::MissingIdentity)
}

/// Enum-like string values, trimmed and lowercased before matching.
fn get_tag(doc: &Value, keys: &[&str]) -> Option<String> {
    get_str(doc, keys).map(|s| s.trim().to_ascii_lowercase())
}

fn parse_level(raw: Option<&str>) -> ExperienceLevel {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("entry") | Some("junior") => ExperienceLevel::Entry,
        Some("senior") => ExperienceLevel::Senior,
        Some("expert") => ExperienceLevel::Expert,
        _ => ExperienceLevel::Intermediate,
    }
}

/// First non-null value under any of the given keys.
fn get_value<'a>(doc: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| doc.get(*k))
        .find(|v| !v.is_null())
}

fn get_str<'a>(doc: &'a Value, keys: &[&str]) -> Option<&'a str> {
    get_value(doc, keys).and_then(|v| v.as_str())
}

fn get_string(doc: &Value, keys: &[&str]) -> Option<String> {
    get_str(doc, keys)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Numbers arrive either as JSON numbers or as numeric strings.
fn get_f64(doc: &Value, keys: &[&str]) -> Option<f64> {
    let value = get_value(doc, keys)?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn get_bool(doc: &Value, keys: &[&str]) -> Option<bool> {
    get_value(doc, keys).and_then(|v| v.as_bool())
}

fn get_array<'a>(doc: &'a Value, keys: &[&str]) -> &'a [Value] {
    get_value(doc, keys)
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Accepts `["a", "b"]` and `[{"name": "a"}, ...]`; blank entries are dropped.
fn get_names(doc: &Value, keys: &[&str]) -> Vec<String> {
    get_array(doc, keys)
        .iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s.as_str()),
            Value::Object(_) => get_str(v, &["name"]),
            _ => None,
        })
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn get_date(doc: &Value, keys: &[&str]) -> Option<NaiveDate> {
    let raw = get_str(doc, keys)?.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
}

fn get_datetime(doc: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    let raw = get_str(doc, keys)?.trim();
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

fn non_negative(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0).max(0.0)
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}
