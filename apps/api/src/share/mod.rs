// Share Store: keyed persistence of analysis results for retrieval by id.
// Exactly two verbs: save and load. No mutation, listing or expiry.

pub mod file;
pub mod handlers;
pub mod memory;
pub mod postgres;
pub mod redis;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::analysis::models::AnalysisResult;

pub use file::FileShareStore;
pub use memory::MemoryShareStore;
pub use postgres::PgShareStore;
pub use self::redis::RedisShareStore;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Shared analysis {0} not found")]
    NotFound(String),

    #[error("Share store backend error: {0}")]
    Backend(String),

    #[error("Share record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<std::io::Error> for ShareError {
    fn from(e: std::io::Error) -> Self {
        ShareError::Backend(e.to_string())
    }
}

impl From<sqlx::Error> for ShareError {
    fn from(e: sqlx::Error) -> Self {
        ShareError::Backend(e.to_string())
    }
}

impl From<::redis::RedisError> for ShareError {
    fn from(e: ::redis::RedisError) -> Self {
        ShareError::Backend(e.to_string())
    }
}

/// A persisted result. Read-only once created; returned verbatim on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedRecord {
    pub id: String,
    pub result: AnalysisResult,
    pub created_at: DateTime<Utc>,
}

impl SharedRecord {
    /// Wraps a result under a fresh opaque id.
    pub fn new(result: AnalysisResult) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            result,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait ShareStore: Send + Sync {
    /// Persists `result` and returns the id it can be loaded by.
    async fn save(&self, result: &AnalysisResult) -> Result<String, ShareError>;

    /// Returns the record saved under `id`, or `ShareError::NotFound`.
    async fn load(&self, id: &str) -> Result<SharedRecord, ShareError>;

    /// Backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}
