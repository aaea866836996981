//! Storage seams for the matching engine.
//!
//! The engine only ever sees raw JSON documents through these traits; the
//! record parser turns them into typed entities. Carried in the engine as
//! `Arc<dyn …>` so adapters can be swapped without touching the caller.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::matching::{MatchRun, ProfileMatch, ProjectMatch};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn fetch_project(&self, id: Uuid) -> Result<Option<Value>, RepositoryError>;

    /// Open projects, newest first.
    async fn list_open_projects(&self, limit: usize) -> Result<Vec<Value>, RepositoryError>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn fetch_profile(&self, id: Uuid) -> Result<Option<Value>, RepositoryError>;

    /// Active, publicly listed profiles that are not marked unavailable.
    async fn list_candidate_profiles(&self, limit: usize)
        -> Result<Vec<Value>, RepositoryError>;
}

/// Sink for finished runs. Callers treat every error from here as non-fatal.
#[async_trait]
pub trait MatchPersister: Send + Sync {
    async fn persist_profile_matches(
        &self,
        run: &MatchRun,
        matches: &[ProfileMatch],
    ) -> Result<(), RepositoryError>;

    async fn persist_project_matches(
        &self,
        run: &MatchRun,
        matches: &[ProjectMatch],
    ) -> Result<(), RepositoryError>;
}

/// Persister used when `PERSIST_MATCHES=false`.
pub struct NoopPersister;

#[async_trait]
impl MatchPersister for NoopPersister {
    async fn persist_profile_matches(
        &self,
        _run: &MatchRun,
        _matches: &[ProfileMatch],
    ) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn persist_project_matches(
        &self,
        _run: &MatchRun,
        _matches: &[ProjectMatch],
    ) -> Result<(), RepositoryError> {
        Ok(())
    }
}
