// Matching pipeline: eligibility, eight dimension scorers, weighted aggregation,
// insights, success estimate and ranking. Everything below `engine` is pure and
// synchronous; `engine` owns the async fan-out and the repositories.

pub mod dimensions;
pub mod eligibility;
pub mod engine;
pub mod handlers;
pub mod insights;
pub mod preferences;
pub mod ranker;
pub mod scoring;
pub mod skills;
pub mod success;
pub mod weights;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::{EngineSettings, MatchError, MatchingEngine};
