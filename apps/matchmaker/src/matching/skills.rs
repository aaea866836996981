//! Skill overlap between a profile and a project's skill requirements.
//!
//! Two matching modes:
//! Matching always looks for the wanted skill inside the profile's skill, never
//! the other way round, so a short profile entry like "go" cannot satisfy
//! "django" or "mongodb".
//!
//! - `Substring`: case-insensitive containment. Loose: "java" is found inside
//!   "javascript". This is what the marketplace has always shipped.
//! - `Token`: both sides are split on non-alphanumeric boundaries (keeping `+` and `#`
//!   so "c++" / "c#" survive) and the wanted token sequence must appear inside the
//!   profile's.

use serde::{Deserialize, Serialize};

use crate::models::matching::SkillsDetail;
use crate::models::profile::Profile;
use crate::models::project::Project;

const REQUIRED_WEIGHT: f64 = 0.8;
const OPTIONAL_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillMatchMode {
    #[default]
    Substring,
    Token,
}

impl std::str::FromStr for SkillMatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" => Ok(SkillMatchMode::Substring),
            "token" => Ok(SkillMatchMode::Token),
            other => Err(format!("unknown skill match mode '{other}'")),
        }
    }
}

impl SkillMatchMode {
    /// True if `wanted` (a project skill or technology) is covered by `have`.
    pub fn matches(self, wanted: &str, have: &str) -> bool {
        let wanted = wanted.trim().to_lowercase();
        let have = have.trim().to_lowercase();
        if wanted.is_empty() || have.is_empty() {
            return false;
        }
        match self {
            SkillMatchMode::Substring => have.contains(&wanted),
            SkillMatchMode::Token => {
                let wanted = tokenize(&wanted);
                let have = tokenize(&have);
                contains_run(&have, &wanted)
            }
        }
    }

    pub fn matches_any<'a>(self, wanted: &str, have: impl IntoIterator<Item = &'a String>) -> bool {
        have.into_iter().any(|h| self.matches(wanted, h))
    }
}

fn tokenize(s: &str) -> Vec<&str> {
    s.split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|t| !t.is_empty())
        .collect()
}

/// True if `needle` appears as a contiguous run inside `haystack`.
fn contains_run(haystack: &[&str], needle: &[&str]) -> bool {
    if needle.is_empty() || needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Skills dimension: `0.8 · required_ratio + 0.2 · optional_ratio`.
///
/// A ratio with no skills in its bucket counts as fully satisfied.
pub fn score_skills(profile: &Profile, project: &Project, mode: SkillMatchMode) -> (f64, SkillsDetail) {
    let mut matched = Vec::new();
    let mut missing_required = Vec::new();

    let mut required_total = 0usize;
    let mut required_hits = 0usize;
    for skill in project.required_skills() {
        required_total += 1;
        if mode.matches_any(&skill.name, &profile.skills) {
            required_hits += 1;
            matched.push(skill.name.clone());
        } else {
            missing_required.push(skill.name.clone());
        }
    }

    let mut optional_total = 0usize;
    let mut optional_hits = 0usize;
    for skill in project.optional_skills() {
        optional_total += 1;
        if mode.matches_any(&skill.name, &profile.skills) {
            optional_hits += 1;
            matched.push(skill.name.clone());
        }
    }

    let required_ratio = ratio(required_hits, required_total);
    let optional_ratio = ratio(optional_hits, optional_total);
    let score = (REQUIRED_WEIGHT * required_ratio + OPTIONAL_WEIGHT * optional_ratio).clamp(0.0, 1.0);

    (
        score,
        SkillsDetail {
            required_ratio,
            optional_ratio,
            matched,
            missing_required,
        },
    )
}

fn ratio(hits: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        hits as f64 / total as f64
    }
}
