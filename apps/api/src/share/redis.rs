use async_trait::async_trait;
use redis::AsyncCommands;

use crate::analysis::models::AnalysisResult;
use crate::share::{ShareError, ShareStore, SharedRecord};

const KEY_PREFIX: &str = "jobalign:share:";

fn record_key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}")
}

/// One string key per record holding the serialized `SharedRecord`. No TTL.
pub struct RedisShareStore {
    client: redis::Client,
}

impl RedisShareStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ShareStore for RedisShareStore {
    async fn save(&self, result: &AnalysisResult) -> Result<String, ShareError> {
        let record = SharedRecord::new(result.clone());
        let payload = serde_json::to_string(&record)?;

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(record_key(&record.id), payload).await?;

        Ok(record.id)
    }

    async fn load(&self, id: &str) -> Result<SharedRecord, ShareError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = conn.get(record_key(id)).await?;

        match payload {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Err(ShareError::NotFound(id.to_string())),
        }
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
