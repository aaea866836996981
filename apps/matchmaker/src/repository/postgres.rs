//! PostgreSQL adapter. Profiles and projects live as JSONB documents; the
//! row id is spliced into the document so the record parser always sees it.
//!
//! Expected tables:
//! - `profiles (id UUID PRIMARY KEY, doc JSONB, is_active BOOL, is_public BOOL, updated_at TIMESTAMPTZ)`
//! - `projects (id UUID PRIMARY KEY, doc JSONB, status TEXT, created_at TIMESTAMPTZ)`
//! - `match_results (run_id UUID, subject TEXT, subject_id UUID, candidate_id UUID,
//!    rank INT, overall DOUBLE PRECISION, result JSONB, as_of TIMESTAMPTZ)`

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use super::{MatchPersister, ProfileRepository, ProjectRepository, RepositoryError};
use crate::models::matching::{MatchRun, MatchSubject, ProfileMatch, ProjectMatch};

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn clamp_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn subject_str(subject: MatchSubject) -> &'static str {
    match subject {
        MatchSubject::Project => "project",
        MatchSubject::Profile => "profile",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Reads
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ProjectRepository for PgDocumentStore {
    async fn fetch_project(&self, id: Uuid) -> Result<Option<Value>, RepositoryError> {
        Ok(sqlx::query_scalar::<_, Value>(
            "SELECT jsonb_set(doc, '{id}', to_jsonb(id::text)) FROM projects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn list_open_projects(&self, limit: usize) -> Result<Vec<Value>, RepositoryError> {
        let docs = sqlx::query_scalar::<_, Value>(
            r#"
            SELECT jsonb_set(doc, '{id}', to_jsonb(id::text))
            FROM projects
            WHERE status = 'open'
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(clamp_limit(limit))
        .fetch_all(&self.pool)
        .await?;

        debug!("Loaded {} open projects", docs.len());
        Ok(docs)
    }
}

#[async_trait]
impl ProfileRepository for PgDocumentStore {
    async fn fetch_profile(&self, id: Uuid) -> Result<Option<Value>, RepositoryError> {
        Ok(sqlx::query_scalar::<_, Value>(
            "SELECT jsonb_set(doc, '{id}', to_jsonb(id::text)) FROM profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn list_candidate_profiles(
        &self,
        limit: usize,
    ) -> Result<Vec<Value>, RepositoryError> {
        let docs = sqlx::query_scalar::<_, Value>(
            r#"
            SELECT jsonb_set(doc, '{id}', to_jsonb(id::text))
            FROM profiles
            WHERE is_active
              AND is_public
              AND lower(trim(COALESCE(doc #>> '{availability,status}', 'available'))) <> 'unavailable'
            ORDER BY updated_at DESC
            LIMIT $1
            "#,
        )
        .bind(clamp_limit(limit))
        .fetch_all(&self.pool)
        .await?;

        debug!("Loaded {} candidate profiles", docs.len());
        Ok(docs)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Writes
// ────────────────────────────────────────────────────────────────────────────

impl PgDocumentStore {
    /// Writes one run inside a transaction. Rows are append-only per run id.
    async fn insert_results(
        &self,
        run: &MatchRun,
        rows: Vec<(Uuid, usize, f64, Value)>,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for (candidate_id, rank, overall, result) in rows {
            sqlx::query(
                r#"
                INSERT INTO match_results
                    (run_id, subject, subject_id, candidate_id, rank, overall, result, as_of)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(run.run_id)
            .bind(subject_str(run.subject))
            .bind(run.subject_id)
            .bind(candidate_id)
            .bind(i32::try_from(rank).unwrap_or(i32::MAX))
            .bind(overall)
            .bind(result)
            .bind(run.as_of)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!(
            "Persisted {} results for run {} ({:?} {})",
            run.results_returned, run.run_id, run.subject, run.subject_id
        );
        Ok(())
    }
}

#[async_trait]
impl MatchPersister for PgDocumentStore {
    async fn persist_profile_matches(
        &self,
        run: &MatchRun,
        matches: &[ProfileMatch],
    ) -> Result<(), RepositoryError> {
        let rows = matches
            .iter()
            .map(|m| {
                Ok((
                    m.profile.id,
                    m.rank,
                    m.score.overall,
                    serde_json::to_value(m)?,
                ))
            })
            .collect::<Result<Vec<_>, serde_json::Error>>()?;
        self.insert_results(run, rows).await
    }

    async fn persist_project_matches(
        &self,
        run: &MatchRun,
        matches: &[ProjectMatch],
    ) -> Result<(), RepositoryError> {
        let rows = matches
            .iter()
            .map(|m| {
                Ok((
                    m.project.id,
                    m.rank,
                    m.score.overall,
                    serde_json::to_value(m)?,
                ))
            })
            .collect::<Result<Vec<_>, serde_json::Error>>()?;
        self.insert_results(run, rows).await
    }
}
