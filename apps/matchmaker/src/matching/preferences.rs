//! Caller preferences for a matching run.
//!
//! Bad values are never fatal: each one is replaced by its default and the
//! correction is reported back as a warning string.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::matching::weights::{FactorOverride, ScoringWeights};

pub const DEFAULT_MINIMUM_SCORE: f64 = 0.3;
pub const DEFAULT_MAX_RESULTS: usize = 20;
pub const MAX_RESULTS_CAP: usize = 100;

/// One `prioritizeFactors` entry as sent. Entries that do not name a known
/// dimension with a numeric weight are kept as raw JSON and dropped during
/// sanitisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactorEntry {
    Known(FactorOverride),
    Unrecognised(Value),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchPreferences {
    pub include_partial_matches: bool,
    pub minimum_score: f64,
    /// Signed so that zero and negative values are corrected, not rejected.
    pub max_results: i64,
    pub prioritize_factors: Vec<FactorEntry>,
    pub exclude_profiles: Vec<Uuid>,
    pub require_verification: bool,
    /// Accepted for API compatibility; no scorer reads it yet.
    #[allow(dead_code)]
    pub budget_tolerance: Option<f64>,
}

impl Default for MatchPreferences {
    fn default() -> Self {
        Self {
            include_partial_matches: true,
            minimum_score: DEFAULT_MINIMUM_SCORE,
            max_results: DEFAULT_MAX_RESULTS as i64,
            prioritize_factors: Vec::new(),
            exclude_profiles: Vec::new(),
            require_verification: false,
            budget_tolerance: None,
        }
    }
}

/// Preferences after validation. This is what the engine and ranker consume.
#[derive(Debug, Clone)]
pub struct EffectivePreferences {
    pub include_partial_matches: bool,
    pub minimum_score: f64,
    pub max_results: usize,
    pub weights: ScoringWeights,
    pub exclude_profiles: HashSet<Uuid>,
    pub require_verification: bool,
}

impl Default for EffectivePreferences {
    fn default() -> Self {
        MatchPreferences::default().sanitize().0
    }
}

impl MatchPreferences {
    pub fn sanitize(&self) -> (EffectivePreferences, Vec<String>) {
        let mut warnings = Vec::new();

        let minimum_score = if self.minimum_score.is_finite()
            && (0.0..=1.0).contains(&self.minimum_score)
        {
            self.minimum_score
        } else {
            warnings.push(format!(
                "minimumScore {} is outside 0.0–1.0; using {DEFAULT_MINIMUM_SCORE}",
                self.minimum_score
            ));
            DEFAULT_MINIMUM_SCORE
        };

        let max_results = match usize::try_from(self.max_results) {
            Ok(0) | Err(_) => {
                warnings.push(format!(
                    "maxResults {} must be positive; using {DEFAULT_MAX_RESULTS}",
                    self.max_results
                ));
                DEFAULT_MAX_RESULTS
            }
            Ok(n) if n > MAX_RESULTS_CAP => {
                warnings.push(format!("maxResults {n} capped at {MAX_RESULTS_CAP}"));
                MAX_RESULTS_CAP
            }
            Ok(n) => n,
        };

        let mut overrides = Vec::with_capacity(self.prioritize_factors.len());
        for entry in &self.prioritize_factors {
            match entry {
                FactorEntry::Known(o) => overrides.push(*o),
                FactorEntry::Unrecognised(raw) => warnings.push(format!(
                    "prioritizeFactors entry {raw} ignored: unknown dimension or weight"
                )),
            }
        }

        let weights = match ScoringWeights::with_overrides(&overrides) {
            Ok(weights) => weights,
            Err(e) => {
                warnings.push(format!("prioritizeFactors ignored: {e}; using default weights"));
                ScoringWeights::default()
            }
        };

        for w in &warnings {
            warn!("Invalid match preferences: {w}");
        }

        (
            EffectivePreferences {
                include_partial_matches: self.include_partial_matches,
                minimum_score,
                max_results,
                weights,
                exclude_profiles: self.exclude_profiles.iter().copied().collect(),
                require_verification: self.require_verification,
            },
            warnings,
        )
    }
}
