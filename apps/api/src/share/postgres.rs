use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;

use crate::analysis::models::AnalysisResult;
use crate::models::shared::SharedAnalysisRow;
use crate::share::{ShareError, ShareStore, SharedRecord};

/// Rows in `shared_analyses`; the result is stored as JSONB.
/// The table is created by `db::ensure_schema` at startup.
pub struct PgShareStore {
    pool: PgPool,
}

impl PgShareStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareStore for PgShareStore {
    async fn save(&self, result: &AnalysisResult) -> Result<String, ShareError> {
        let record = SharedRecord::new(result.clone());

        sqlx::query(
            r#"
            INSERT INTO shared_analyses (id, result, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&record.id)
        .bind(Json(&record.result))
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        debug!("Inserted shared analysis {}", record.id);
        Ok(record.id)
    }

    async fn load(&self, id: &str) -> Result<SharedRecord, ShareError> {
        let row = sqlx::query_as::<_, SharedAnalysisRow>(
            r#"
            SELECT id, result, created_at
            FROM shared_analyses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(SharedRecord::from)
            .ok_or_else(|| ShareError::NotFound(id.to_string()))
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
