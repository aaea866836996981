//! The matching engine. Stateless apart from its injected repositories.
//!
//! # Run shape
//! 1. Resolve the subject (project or profile) and parse it.
//! 2. Load the candidate pool, parse each document and drop the ones that fail.
//! 3. Eligibility pre-screen.
//! 4. Score candidates batch by batch. Every candidate in a batch is scored on
//!    the blocking pool and the batch is joined before the next one starts; an
//!    optional deadline is checked between batches.
//! 5. Rank, then hand the result to the persister. Persistence never fails a run.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::matching::eligibility::is_eligible;
use crate::matching::preferences::MatchPreferences;
use crate::matching::ranker::{rank_profiles, rank_projects, ScoredProfile, ScoredProject};
use crate::matching::scoring::{score_pair, ScoringContext};
use crate::matching::skills::SkillMatchMode;
use crate::models::matching::{
    MatchOutcome, MatchRun, MatchScore, MatchSubject, ProfileMatch, ProjectMatch,
};
use crate::models::profile::Profile;
use crate::models::project::Project;
use crate::records::{parse_profile, parse_project};
use crate::repository::{MatchPersister, ProfileRepository, ProjectRepository, RepositoryError};

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("scoring task failed: {0}")]
    Internal(String),
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Profiles loaded when ranking candidates for a project.
    pub project_pool_limit: usize,
    /// Projects loaded when ranking projects for a profile.
    pub profile_pool_limit: usize,
    pub batch_size: usize,
    pub deadline: Option<Duration>,
    pub mode: SkillMatchMode,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            project_pool_limit: 100,
            profile_pool_limit: 50,
            batch_size: 25,
            deadline: None,
            mode: SkillMatchMode::Substring,
        }
    }
}

pub struct MatchingEngine {
    profiles: Arc<dyn ProfileRepository>,
    projects: Arc<dyn ProjectRepository>,
    persister: Arc<dyn MatchPersister>,
    settings: EngineSettings,
}

/// Scored candidates plus whether the deadline cut the run short.
struct BatchOutcome<C> {
    scored: Vec<(C, MatchScore)>,
    truncated: bool,
}

impl MatchingEngine {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        projects: Arc<dyn ProjectRepository>,
        persister: Arc<dyn MatchPersister>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            profiles,
            projects,
            persister,
            settings,
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Candidates for a project
    // ────────────────────────────────────────────────────────────────────────

    pub async fn find_matches(
        &self,
        project_id: Uuid,
        preferences: &MatchPreferences,
    ) -> Result<MatchOutcome<ProfileMatch>, MatchError> {
        self.find_matches_at(project_id, preferences, Utc::now()).await
    }

    /// Same as [`find_matches`](Self::find_matches) with a caller-supplied "now".
    pub async fn find_matches_at(
        &self,
        project_id: Uuid,
        preferences: &MatchPreferences,
        as_of: DateTime<Utc>,
    ) -> Result<MatchOutcome<ProfileMatch>, MatchError> {
        let (effective, warnings) = preferences.sanitize();

        let doc = self
            .projects
            .fetch_project(project_id)
            .await?
            .ok_or_else(|| MatchError::NotFound(format!("project {project_id}")))?;
        let project = parse_project(&doc)
            .map_err(|e| MatchError::NotFound(format!("project {project_id} ({e})")))?;

        let docs = self
            .profiles
            .list_candidate_profiles(self.settings.project_pool_limit)
            .await?;
        let pool: Vec<Profile> = docs
            .iter()
            .filter_map(|doc| match parse_profile(doc) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    warn!("Skipping candidate profile for project {project_id}: {e}");
                    None
                }
            })
            .collect();
        let candidates_considered = pool.len();

        let eligible: Vec<Profile> = pool
            .into_iter()
            .filter(|p| is_eligible(p, &project))
            .collect();
        debug!(
            "Project {project_id}: {} of {candidates_considered} profiles eligible",
            eligible.len()
        );

        let ctx = ScoringContext {
            weights: effective.weights,
            mode: self.settings.mode,
            as_of,
        };
        let subject = Arc::new(project);
        let scoring_subject = Arc::clone(&subject);
        let batches = self
            .score_in_batches(eligible, move |profile: &Profile| {
                score_pair(profile, &scoring_subject, &ctx)
            })
            .await?;

        let candidates_scored = batches.scored.len();
        let scored = batches
            .scored
            .into_iter()
            .map(|(profile, score)| ScoredProfile { profile, score })
            .collect();
        let matches = rank_profiles(&subject, scored, &effective);

        let run = MatchRun {
            run_id: Uuid::new_v4(),
            subject: MatchSubject::Project,
            subject_id: project_id,
            as_of,
            candidates_considered,
            candidates_scored,
            results_returned: matches.len(),
            truncated: batches.truncated,
        };
        info!(
            "Matched project {project_id}: {} results from {candidates_scored} scored candidates",
            matches.len()
        );

        if let Err(e) = self.persister.persist_profile_matches(&run, &matches).await {
            warn!("Failed to persist matches for run {}: {e}", run.run_id);
        }

        Ok(MatchOutcome {
            run,
            matches,
            warnings,
        })
    }

    // ────────────────────────────────────────────────────────────────────────
    // Projects for a profile
    // ────────────────────────────────────────────────────────────────────────

    pub async fn find_projects_for_profile(
        &self,
        profile_id: Uuid,
        preferences: &MatchPreferences,
    ) -> Result<MatchOutcome<ProjectMatch>, MatchError> {
        self.find_projects_for_profile_at(profile_id, preferences, Utc::now())
            .await
    }

    pub async fn find_projects_for_profile_at(
        &self,
        profile_id: Uuid,
        preferences: &MatchPreferences,
        as_of: DateTime<Utc>,
    ) -> Result<MatchOutcome<ProjectMatch>, MatchError> {
        let (effective, warnings) = preferences.sanitize();

        let doc = self
            .profiles
            .fetch_profile(profile_id)
            .await?
            .ok_or_else(|| MatchError::NotFound(format!("profile {profile_id}")))?;
        let profile = parse_profile(&doc)
            .map_err(|e| MatchError::NotFound(format!("profile {profile_id} ({e})")))?;

        let docs = self
            .projects
            .list_open_projects(self.settings.profile_pool_limit)
            .await?;
        let pool: Vec<Project> = docs
            .iter()
            .filter_map(|doc| match parse_project(doc) {
                Ok(project) => Some(project),
                Err(e) => {
                    warn!("Skipping open project for profile {profile_id}: {e}");
                    None
                }
            })
            .collect();
        let candidates_considered = pool.len();

        let eligible: Vec<Project> = pool
            .into_iter()
            .filter(|p| is_eligible(&profile, p))
            .collect();

        let ctx = ScoringContext {
            weights: effective.weights,
            mode: self.settings.mode,
            as_of,
        };
        let subject = Arc::new(profile);
        let batches = self
            .score_in_batches(eligible, move |project: &Project| {
                score_pair(&subject, project, &ctx)
            })
            .await?;

        let candidates_scored = batches.scored.len();
        let scored = batches
            .scored
            .into_iter()
            .map(|(project, score)| ScoredProject { project, score })
            .collect();
        let matches = rank_projects(scored, &effective);

        let run = MatchRun {
            run_id: Uuid::new_v4(),
            subject: MatchSubject::Profile,
            subject_id: profile_id,
            as_of,
            candidates_considered,
            candidates_scored,
            results_returned: matches.len(),
            truncated: batches.truncated,
        };
        info!(
            "Matched profile {profile_id}: {} results from {candidates_scored} scored projects",
            matches.len()
        );

        if let Err(e) = self.persister.persist_project_matches(&run, &matches).await {
            warn!("Failed to persist project matches for run {}: {e}", run.run_id);
        }

        Ok(MatchOutcome {
            run,
            matches,
            warnings,
        })
    }

    // ────────────────────────────────────────────────────────────────────────
    // Fan-out / fan-in
    // ────────────────────────────────────────────────────────────────────────

    /// Scores `candidates` in batches on the blocking pool.
    ///
    /// The deadline is only consulted between batches, so the first batch
    /// always runs and a batch that has started is always finished.
    async fn score_in_batches<C, F>(
        &self,
        candidates: Vec<C>,
        score: F,
    ) -> Result<BatchOutcome<C>, MatchError>
    where
        C: Send + 'static,
        F: Fn(&C) -> MatchScore + Send + Sync + 'static,
    {
        let score = Arc::new(score);
        let batch_size = self.settings.batch_size.max(1);
        let started = Instant::now();

        let mut scored = Vec::with_capacity(candidates.len());
        let mut truncated = false;
        let mut remaining = candidates.into_iter().peekable();

        while remaining.peek().is_some() {
            if let Some(deadline) = self.settings.deadline {
                if !scored.is_empty() && started.elapsed() >= deadline {
                    warn!(
                        "Scoring deadline of {deadline:?} reached after {} candidates; ranking partial pool",
                        scored.len()
                    );
                    truncated = true;
                    break;
                }
            }

            let batch: Vec<C> = remaining.by_ref().take(batch_size).collect();
            let tasks = batch.into_iter().map(|candidate| {
                let score = Arc::clone(&score);
                tokio::task::spawn_blocking(move || {
                    let result = score(&candidate);
                    (candidate, result)
                })
            });

            for joined in join_all(tasks).await {
                scored.push(joined.map_err(|e| MatchError::Internal(e.to_string()))?);
            }
        }

        Ok(BatchOutcome { scored, truncated })
    }
}
