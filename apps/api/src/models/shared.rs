use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::analysis::models::AnalysisResult;
use crate::share::SharedRecord;

#[derive(Debug, Clone, FromRow)]
pub struct SharedAnalysisRow {
    pub id: String,
    pub result: Json<AnalysisResult>,
    pub created_at: DateTime<Utc>,
}

impl From<SharedAnalysisRow> for SharedRecord {
    fn from(row: SharedAnalysisRow) -> Self {
        SharedRecord {
            id: row.id,
            result: row.result.0,
            created_at: row.created_at,
        }
    }
}
