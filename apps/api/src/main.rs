mod analysis;
mod config;
mod db;
mod errors;
mod extractor;
mod llm_client;
mod models;
mod routes;
mod share;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::orchestrator::Analyzer;
use crate::config::{Config, ShareBackend};
use crate::db::{create_pool, ensure_schema};
use crate::extractor::PdfTextExtractor;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::share::{FileShareStore, MemoryShareStore, PgShareStore, RedisShareStore, ShareStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobAlign API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion provider
    let gemini = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_api_base.clone(),
        config.gemini_model.clone(),
    );
    if gemini.is_configured() {
        info!("Gemini client initialized (model: {})", config.gemini_model);
    } else {
        warn!("GEMINI_API_KEY is not set; analyses will return degraded results");
    }

    let analyzer = Analyzer::new(
        Arc::new(gemini),
        Arc::new(PdfTextExtractor),
        config.input_limits,
        config.provider_timeout,
    );

    // Initialize share store
    let shares = build_share_store(&config.share_backend).await?;
    info!("Share store initialized ({})", config.share_backend);

    // Build app state
    let state = AppState {
        analyzer: Arc::new(analyzer),
        shares,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Connects the configured share backend, creating its schema where needed.
async fn build_share_store(backend: &ShareBackend) -> Result<Arc<dyn ShareStore>> {
    let store: Arc<dyn ShareStore> = match backend {
        ShareBackend::Memory => Arc::new(MemoryShareStore::new()),
        ShareBackend::File { path } => Arc::new(FileShareStore::new(path)),
        ShareBackend::Postgres { database_url } => {
            let pool = create_pool(database_url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgShareStore::new(pool))
        }
        ShareBackend::Redis { redis_url } => {
            let client = redis::Client::open(redis_url.as_str())?;
            info!("Redis client initialized");
            Arc::new(RedisShareStore::new(client))
        }
    };
    Ok(store)
}
