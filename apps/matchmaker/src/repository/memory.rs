//! In-memory adapters used by the engine and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::{MatchPersister, ProfileRepository, ProjectRepository, RepositoryError};
use crate::models::matching::{MatchRun, ProfileMatch, ProjectMatch};

fn doc_id(doc: &Value) -> Option<Uuid> {
    doc.get("id")
        .or_else(|| doc.get("_id"))
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
}

fn is_unavailable(doc: &Value) -> bool {
    doc.pointer("/availability/status").and_then(Value::as_str) == Some("unavailable")
}

#[derive(Default)]
pub struct MemoryStore {
    pub profiles: Vec<Value>,
    pub projects: Vec<Value>,
}

impl MemoryStore {
    pub fn new(profiles: Vec<Value>, projects: Vec<Value>) -> Self {
        Self { profiles, projects }
    }
}

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn fetch_project(&self, id: Uuid) -> Result<Option<Value>, RepositoryError> {
        Ok(self.projects.iter().find(|d| doc_id(d) == Some(id)).cloned())
    }

    async fn list_open_projects(&self, limit: usize) -> Result<Vec<Value>, RepositoryError> {
        Ok(self.projects.iter().take(limit).cloned().collect())
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn fetch_profile(&self, id: Uuid) -> Result<Option<Value>, RepositoryError> {
        Ok(self.profiles.iter().find(|d| doc_id(d) == Some(id)).cloned())
    }

    async fn list_candidate_profiles(
        &self,
        limit: usize,
    ) -> Result<Vec<Value>, RepositoryError> {
        Ok(self
            .profiles
            .iter()
            .filter(|d| !is_unavailable(d))
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Records every run it is handed.
#[derive(Default)]
pub struct RecordingPersister {
    pub runs: Mutex<Vec<(MatchRun, Vec<Uuid>)>>,
}

impl RecordingPersister {
    pub fn runs(&self) -> Vec<(MatchRun, Vec<Uuid>)> {
        self.runs.lock().unwrap().clone()
    }
}

#[async_trait]
impl MatchPersister for RecordingPersister {
    async fn persist_profile_matches(
        &self,
        run: &MatchRun,
        matches: &[ProfileMatch],
    ) -> Result<(), RepositoryError> {
        let ids = matches.iter().map(|m| m.profile.id).collect();
        self.runs.lock().unwrap().push((run.clone(), ids));
        Ok(())
    }

    async fn persist_project_matches(
        &self,
        run: &MatchRun,
        matches: &[ProjectMatch],
    ) -> Result<(), RepositoryError> {
        let ids = matches.iter().map(|m| m.project.id).collect();
        self.runs.lock().unwrap().push((run.clone(), ids));
        Ok(())
    }
}

/// Always fails, to prove persistence errors never reach the caller.
pub struct FailingPersister;

#[async_trait]
impl MatchPersister for FailingPersister {
    async fn persist_profile_matches(
        &self,
        _run: &MatchRun,
        _matches: &[ProfileMatch],
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("match store offline".to_string()))
    }

    async fn persist_project_matches(
        &self,
        _run: &MatchRun,
        _matches: &[ProjectMatch],
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("match store offline".to_string()))
    }
}
