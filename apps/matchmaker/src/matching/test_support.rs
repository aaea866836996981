//! Fixture builders shared by the matching tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::models::profile::{
    Availability, AvailabilityStatus, Experience, ExperienceLevel, Portfolio, Pricing, Profile,
    ProfileLocation, UserType, Verification,
};
use crate::models::project::{
    Budget, BudgetType, ClientResponsiveness, Complexity, LocationType, Project, ProjectLocation,
    SkillRequirement, Timeline,
};

pub fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A senior Rust freelancer who is free now and charges $75/h.
pub fn base_profile() -> Profile {
    Profile {
        id: Uuid::new_v4(),
        user_type: UserType::Freelancer,
        display_name: "Test Provider".to_string(),
        skills: vec!["rust".to_string()],
        experience: Experience {
            level: ExperienceLevel::Senior,
            years: 6.0,
            industries: vec!["fintech".to_string()],
        },
        availability: Availability {
            status: AvailabilityStatus::Available,
            capacity: 100.0,
            next_available: None,
        },
        location: ProfileLocation {
            country: Some("US".to_string()),
            city: Some("New York".to_string()),
            timezone: Some("America/New_York".to_string()),
            accepts_remote: true,
        },
        pricing: Pricing {
            hourly_rate: Some(75.0),
            project_rate: None,
            retainer_rate: None,
            currency: "USD".to_string(),
        },
        portfolio: Portfolio {
            projects: vec![],
            average_rating: 0.0,
            rating_count: 0,
        },
        verification: Verification {
            verified: false,
            badges: vec![],
        },
        response_time_hours: 12.0,
        last_active: None,
    }
}

/// A remote, hourly ($50–$100) Rust project for a senior with 3+ years.
pub fn base_project() -> Project {
    Project {
        id: Uuid::new_v4(),
        title: "Payments service".to_string(),
        description: "Build a payments service".to_string(),
        skills: vec![SkillRequirement {
            name: "rust".to_string(),
            level: ExperienceLevel::Senior,
            required: true,
        }],
        budget: Budget {
            min: 50.0,
            max: 100.0,
            currency: "USD".to_string(),
            budget_type: BudgetType::Hourly,
        },
        timeline: Timeline {
            start: Some(date(2026, 12, 1)),
            end: None,
            duration_days: Some(90),
        },
        location: ProjectLocation {
            location_type: LocationType::Remote,
            countries: vec![],
            city: None,
            timezone: None,
        },
        industry: Some("fintech".to_string()),
        complexity: Complexity::Moderate,
        min_experience_years: 3.0,
        preferred_level: ExperienceLevel::Senior,
        client: ClientResponsiveness {
            expected_response_hours: 24.0,
        },
    }
}

pub fn profile_with(edit: impl FnOnce(&mut Profile)) -> Profile {
    let mut profile = base_profile();
    edit(&mut profile);
    profile
}

pub fn project_with(edit: impl FnOnce(&mut Project)) -> Project {
    let mut project = base_project();
    edit(&mut project);
    project
}
