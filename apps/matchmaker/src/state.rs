use std::sync::Arc;

use crate::config::Config;
use crate::matching::MatchingEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read by `/health` to report the limits this instance runs with.
    pub config: Config,
    /// Repositories are wired in at startup; handlers only see the engine.
    pub engine: Arc<MatchingEngine>,
}
