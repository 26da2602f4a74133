use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::analysis::models::AnalysisResult;
use crate::share::{ShareError, ShareStore, SharedRecord};

/// Single JSON document on disk, keyed by id.
///
/// Writes are serialized through a mutex and land via write-to-temp + rename,
/// so a crash mid-write never leaves a truncated file behind.
pub struct FileShareStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileShareStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, SharedRecord>, ShareError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, records: &BTreeMap<String, SharedRecord>) -> Result<(), ShareError> {
        let payload = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, payload).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl ShareStore for FileShareStore {
    async fn save(&self, result: &AnalysisResult) -> Result<String, ShareError> {
        let _guard = self.lock.lock().await;

        let mut records = self.read_all().await?;
        let record = SharedRecord::new(result.clone());
        let id = record.id.clone();
        records.insert(id.clone(), record);
        self.write_all(&records).await?;

        debug!("Saved shared analysis {} to {}", id, self.path().display());
        Ok(id)
    }

    async fn load(&self, id: &str) -> Result<SharedRecord, ShareError> {
        let _guard = self.lock.lock().await;

        self.read_all()
            .await?
            .remove(id)
            .ok_or_else(|| ShareError::NotFound(id.to_string()))
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}
