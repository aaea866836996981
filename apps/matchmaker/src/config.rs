use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::matching::skills::SkillMatchMode;
use crate::matching::EngineSettings;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    pub project_pool_limit: usize,
    pub profile_pool_limit: usize,
    pub batch_size: usize,
    /// Unset means runs are never cut short.
    pub deadline: Option<Duration>,
    pub skill_match_mode: SkillMatchMode,
    pub persist_matches: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let batch_size: usize = env_or("MATCH_BATCH_SIZE", 25)?;
        if batch_size == 0 {
            return Err(anyhow!("MATCH_BATCH_SIZE must be at least 1"));
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            db_max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10)?,
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            project_pool_limit: env_or("MATCH_PROJECT_POOL_LIMIT", 100)?,
            profile_pool_limit: env_or("MATCH_PROFILE_POOL_LIMIT", 50)?,
            batch_size,
            deadline: optional_env::<u64>("MATCH_DEADLINE_MS")?.map(Duration::from_millis),
            skill_match_mode: std::env::var("SKILL_MATCH_MODE")
                .ok()
                .map(|raw| raw.parse::<SkillMatchMode>().map_err(|e| anyhow!(e)))
                .transpose()
                .context("SKILL_MATCH_MODE must be 'substring' or 'token'")?
                .unwrap_or_default(),
            persist_matches: env_or("PERSIST_MATCHES", true)?,
        })
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            project_pool_limit: self.project_pool_limit,
            profile_pool_limit: self.profile_pool_limit,
            batch_size: self.batch_size,
            deadline: self.deadline,
            mode: self.skill_match_mode,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(None),
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(optional_env(key)?.unwrap_or(default))
}
