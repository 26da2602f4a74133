//! Text Extractor: best-effort plain text from an uploaded document.
//!
//! Extraction never fails across this boundary: unreadable input yields an
//! empty string and the orchestrator's length guard rejects it.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, document: Bytes) -> String;
}

/// PDF extraction via `pdf-extract`. CPU-bound, so it runs on the blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, document: Bytes) -> String {
        if document.is_empty() {
            return String::new();
        }

        let size = document.len();
        let extracted =
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&document))
                .await;

        match extracted {
            Ok(Ok(text)) => {
                let text = text.trim().to_string();
                debug!("Extracted {} chars from {} byte PDF", text.len(), size);
                text
            }
            Ok(Err(e)) => {
                warn!("PDF text extraction failed: {e}");
                String::new()
            }
            // pdf-extract panics on some malformed inputs; the join error carries it.
            Err(e) => {
                warn!("PDF text extraction aborted: {e}");
                String::new()
            }
        }
    }
}
