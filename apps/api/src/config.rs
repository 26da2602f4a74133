use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::analysis::orchestrator::InputLimits;
use crate::llm_client::{DEFAULT_API_BASE, DEFAULT_MODEL};

const DEFAULT_PORT: u16 = 5001;
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 45;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_SHARE_STORE_PATH: &str = "shared_analyses.json";

/// Where shared analyses are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareBackend {
    Memory,
    File { path: String },
    Postgres { database_url: String },
    Redis { redis_url: String },
}

impl ShareBackend {
    pub fn name(&self) -> &'static str {
        match self {
            ShareBackend::Memory => "memory",
            ShareBackend::File { .. } => "file",
            ShareBackend::Postgres { .. } => "postgres",
            ShareBackend::Redis { .. } => "redis",
        }
    }
}

impl fmt::Display for ShareBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShareBackendKind {
    Memory,
    File,
    Postgres,
    Redis,
}

impl FromStr for ShareBackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "memory" => Ok(ShareBackendKind::Memory),
            "file" => Ok(ShareBackendKind::File),
            "postgres" | "postgresql" => Ok(ShareBackendKind::Postgres),
            "redis" => Ok(ShareBackendKind::Redis),
            other => Err(anyhow!(
                "SHARE_STORE must be one of memory, file, postgres, redis (got '{other}')"
            )),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup on malformed values or a share backend missing its URL.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Absent key is allowed; provider calls then degrade per request.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub provider_timeout: Duration,
    pub input_limits: InputLimits,
    pub max_upload_bytes: usize,
    pub share_backend: ShareBackend,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_api_base: DEFAULT_API_BASE.to_string(),
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            input_limits: InputLimits::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            share_backend: ShareBackend::Memory,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. `from_env` passes the process env.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let share_backend = match get("SHARE_STORE")
            .map(|v| v.parse::<ShareBackendKind>())
            .transpose()?
            .unwrap_or(ShareBackendKind::Memory)
        {
            ShareBackendKind::Memory => ShareBackend::Memory,
            ShareBackendKind::File => ShareBackend::File {
                path: get("SHARE_STORE_PATH")
                    .unwrap_or_else(|| DEFAULT_SHARE_STORE_PATH.to_string()),
            },
            ShareBackendKind::Postgres => ShareBackend::Postgres {
                database_url: require(&get, "DATABASE_URL")?,
            },
            ShareBackendKind::Redis => ShareBackend::Redis {
                redis_url: require(&get, "REDIS_URL")?,
            },
        };

        Ok(Config {
            port: parse_or(&get, "PORT", defaults.port)?,
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_api_base: get("GEMINI_API_BASE").unwrap_or(defaults.gemini_api_base),
            provider_timeout: Duration::from_secs(parse_or(
                &get,
                "PROVIDER_TIMEOUT_SECS",
                DEFAULT_PROVIDER_TIMEOUT_SECS,
            )?),
            input_limits: InputLimits {
                min_resume_chars: parse_or(
                    &get,
                    "MIN_RESUME_CHARS",
                    defaults.input_limits.min_resume_chars,
                )?,
                min_job_description_chars: parse_or(
                    &get,
                    "MIN_JOB_DESCRIPTION_CHARS",
                    defaults.input_limits.min_job_description_chars,
                )?,
            },
            max_upload_bytes: parse_or(&get, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            share_backend,
        })
    }
}

fn require(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    get(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number (got '{raw}')")),
        None => Ok(default),
    }
}
