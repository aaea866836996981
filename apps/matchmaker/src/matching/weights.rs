//! Weight vector for the aggregator, and the `prioritize_factors` override policy.
//!
//! Overrides pin the named dimensions to the requested weight. Whatever mass is left
//! (`1 − Σ overrides`) is spread over the unnamed dimensions in proportion to their
//! default weights, so the vector always sums to 1.0 and the overall score stays a
//! convex combination of the sub-scores.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::matching::{Dimension, ScoreBreakdown};

const SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWeights {
    pub skills: f64,
    pub experience: f64,
    pub availability: f64,
    pub budget: f64,
    pub location: f64,
    pub portfolio: f64,
    pub response_time: f64,
    pub verification: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.25,
            experience: 0.20,
            availability: 0.15,
            budget: 0.15,
            location: 0.10,
            portfolio: 0.08,
            response_time: 0.04,
            verification: 0.03,
        }
    }
}

/// One entry of `prioritizeFactors`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorOverride {
    pub dimension: Dimension,
    pub weight: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum WeightError {
    #[error("weight {weight} for {dimension:?} is outside 0.0–1.0")]
    OutOfRange { dimension: Dimension, weight: f64 },

    #[error("{0:?} is prioritised more than once")]
    Duplicate(Dimension),

    #[error("prioritised weights sum to {0:.3}, more than 1.0")]
    Exceeds(f64),

    #[error("all dimensions prioritised but weights sum to {0:.3}, not 1.0")]
    Incomplete(f64),
}

impl ScoringWeights {
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

    fn set(&mut self, dimension: Dimension, weight: f64) {
        let slot = match dimension {
            Dimension::Skills => &mut self.skills,
            Dimension::Experience => &mut self.experience,
            Dimension::Availability => &mut self.availability,
            Dimension::Budget => &mut self.budget,
            Dimension::Location => &mut self.location,
            Dimension::Portfolio => &mut self.portfolio,
            Dimension::ResponseTime => &mut self.response_time,
            Dimension::Verification => &mut self.verification,
        };
        *slot = weight;
    }

    pub fn sum(&self) -> f64 {
        Dimension::ALL.iter().map(|d| self.get(*d)).sum()
    }

    /// Default vector with `overrides` applied and the rest renormalised.
    pub fn with_overrides(overrides: &[FactorOverride]) -> Result<Self, WeightError> {
        let defaults = Self::default();
        if overrides.is_empty() {
            return Ok(defaults);
        }

        let mut named = HashSet::new();
        let mut pinned = 0.0;
        for o in overrides {
            if !o.weight.is_finite() || !(0.0..=1.0).contains(&o.weight) {
                return Err(WeightError::OutOfRange {
                    dimension: o.dimension,
                    weight: o.weight,
                });
            }
            if !named.insert(o.dimension) {
                return Err(WeightError::Duplicate(o.dimension));
            }
            pinned += o.weight;
        }
        if pinned > 1.0 + SUM_TOLERANCE {
            return Err(WeightError::Exceeds(pinned));
        }

        let free_default_mass: f64 = Dimension::ALL
            .iter()
            .filter(|d| !named.contains(*d))
            .map(|d| defaults.get(*d))
            .sum();
        if free_default_mass == 0.0 && (pinned - 1.0).abs() > SUM_TOLERANCE {
            return Err(WeightError::Incomplete(pinned));
        }

        let remaining = (1.0 - pinned).max(0.0);
        let mut weights = defaults;
        for dimension in Dimension::ALL {
            if !named.contains(&dimension) {
                weights.set(dimension, defaults.get(dimension) * remaining / free_default_mass);
            }
        }
        for o in overrides {
            weights.set(o.dimension, o.weight);
        }
        Ok(weights)
    }

    /// Weighted sum of the breakdown, rounded to 2 decimals.
    pub fn combine(&self, breakdown: &ScoreBreakdown) -> f64 {
        let total: f64 = breakdown.iter().map(|(d, score)| score * self.get(d)).sum();
        round2(total.clamp(0.0, 1.0))
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(score: f64) -> ScoreBreakdown {
        ScoreBreakdown {
            skills: score,
            experience: score,
            availability: score,
            budget: score,
            location: score,
            portfolio: score,
            response_time: score,
            verification: score,
        }
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((ScoringWeights::default().sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_combine_is_convex() {
        let w = ScoringWeights::default();
        assert_eq!(w.combine(&uniform(1.0)), 1.0);
        assert_eq!(w.combine(&uniform(0.0)), 0.0);
        assert_eq!(w.combine(&uniform(0.5)), 0.5);
    }

    #[test]
    fn test_combine_rounds_to_two_decimals() {
        let breakdown = ScoreBreakdown {
            skills: 0.8,
            experience: 0.875,
            availability: 0.9,
            budget: 0.6,
            location: 1.0,
            portfolio: 0.57,
            response_time: 1.0,
            verification: 0.0,
        };
        // 0.2 + 0.175 + 0.135 + 0.09 + 0.1 + 0.0456 + 0.04 + 0 = 0.7856
        assert_eq!(ScoringWeights::default().combine(&breakdown), 0.79);
    }

    #[test]
    fn test_no_overrides_is_default() {
        assert_eq!(
            ScoringWeights::with_overrides(&[]).unwrap(),
            ScoringWeights::default()
        );
    }

    #[test]
    fn test_override_renormalises_the_rest() {
        let w = ScoringWeights::with_overrides(&[FactorOverride {
            dimension: Dimension::Budget,
            weight: 0.40,
        }])
        .unwrap();

        assert_eq!(w.budget, 0.40);
        assert!((w.sum() - 1.0).abs() < 1e-9, "sum was {}", w.sum());
        // Unnamed dimensions keep their relative proportions.
        assert!((w.skills / w.experience - 0.25 / 0.20).abs() < 1e-9);
        assert!(w.skills < ScoringWeights::default().skills);
    }

    #[test]
    fn test_full_override_must_sum_to_one() {
        let mut all: Vec<FactorOverride> = Dimension::ALL
            .iter()
            .map(|d| FactorOverride {
                dimension: *d,
                weight: 0.125,
            })
            .collect();
        let w = ScoringWeights::with_overrides(&all).unwrap();
        assert!((w.sum() - 1.0).abs() < 1e-9);

        all[0].weight = 0.0;
        assert!(matches!(
            ScoringWeights::with_overrides(&all),
            Err(WeightError::Incomplete(_))
        ));
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        let negative = [FactorOverride {
            dimension: Dimension::Skills,
            weight: -0.1,
        }];
        assert!(matches!(
            ScoringWeights::with_overrides(&negative),
            Err(WeightError::OutOfRange { .. })
        ));

        let duplicate = [
            FactorOverride {
                dimension: Dimension::Skills,
                weight: 0.3,
            },
            FactorOverride {
                dimension: Dimension::Skills,
                weight: 0.2,
            },
        ];
        assert_eq!(
            ScoringWeights::with_overrides(&duplicate),
            Err(WeightError::Duplicate(Dimension::Skills))
        );

        let too_heavy = [
            FactorOverride {
                dimension: Dimension::Skills,
                weight: 0.7,
            },
            FactorOverride {
                dimension: Dimension::Budget,
                weight: 0.6,
            },
        ];
        assert!(matches!(
            ScoringWeights::with_overrides(&too_heavy),
            Err(WeightError::Exceeds(_))
        ));
    }

    #[test]
    fn test_factor_override_deserializes_camel_case_dimension() {
        let o: FactorOverride =
            serde_json::from_str(r#"{"dimension": "responseTime", "weight": 0.1}"#).unwrap();
        assert_eq!(o.dimension, Dimension::ResponseTime);
    }
}
