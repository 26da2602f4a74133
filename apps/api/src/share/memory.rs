use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::analysis::models::AnalysisResult;
use crate::share::{ShareError, ShareStore, SharedRecord};

/// Process-local store. Contents are lost on restart; used in tests and dev.
#[derive(Default)]
pub struct MemoryShareStore {
    records: RwLock<HashMap<String, SharedRecord>>,
}

impl MemoryShareStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShareStore for MemoryShareStore {
    async fn save(&self, result: &AnalysisResult) -> Result<String, ShareError> {
        let record = SharedRecord::new(result.clone());
        let id = record.id.clone();
        self.records.write().await.insert(id.clone(), record);
        Ok(id)
    }

    async fn load(&self, id: &str) -> Result<SharedRecord, ShareError> {
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ShareError::NotFound(id.to_string()))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
