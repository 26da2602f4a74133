use std::sync::Arc;

use crate::analysis::orchestrator::Analyzer;
use crate::config::Config;
use crate::share::ShareStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    /// Pluggable share store, chosen by `SHARE_STORE` at startup.
    pub shares: Arc<dyn ShareStore>,
    pub config: Config,
}
