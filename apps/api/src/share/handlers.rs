use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::analysis::models::AnalysisResult;
use crate::analysis::parser::lists::{MAX_ITEM_CHARS, MAX_KEYWORDS, MIN_ITEM_CHARS};
use crate::analysis::parser::text::MAX_SUMMARY_CHARS;
use crate::errors::AppError;
use crate::share::SharedRecord;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub id: String,
}

/// Client-submitted results must still satisfy the result bounds.
fn check_shareable(result: &AnalysisResult) -> Result<(), AppError> {
    if result.match_score > 100 {
        return Err(AppError::Validation(format!(
            "matchScore must be between 0 and 100, got {}",
            result.match_score
        )));
    }
    if result.missing_keywords.is_empty() || result.missing_keywords.len() > MAX_KEYWORDS {
        return Err(AppError::Validation(format!(
            "missingKeywords must hold between 1 and {MAX_KEYWORDS} entries, got {}",
            result.missing_keywords.len()
        )));
    }
    if let Some(keyword) = result
        .missing_keywords
        .iter()
        .find(|k| !(MIN_ITEM_CHARS..=MAX_ITEM_CHARS).contains(&k.chars().count()))
    {
        return Err(AppError::Validation(format!(
            "missingKeywords entries must be {MIN_ITEM_CHARS}-{MAX_ITEM_CHARS} characters, got {keyword:?}"
        )));
    }
    let summary_len = result.summary.chars().count();
    if summary_len > MAX_SUMMARY_CHARS {
        return Err(AppError::Validation(format!(
            "summary must be at most {MAX_SUMMARY_CHARS} characters, got {summary_len}"
        )));
    }
    Ok(())
}

/// POST /analysis
pub async fn handle_share(
    State(state): State<AppState>,
    Json(result): Json<AnalysisResult>,
) -> Result<(StatusCode, Json<ShareResponse>), AppError> {
    check_shareable(&result)?;
    let id = state.shares.save(&result).await?;
    info!("Shared analysis {} via {} store", id, state.shares.backend());
    Ok((StatusCode::CREATED, Json(ShareResponse { id })))
}

/// GET /analysis/:id
pub async fn handle_get_shared(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SharedRecord>, AppError> {
    let record = state.shares.load(&id).await?;
    Ok(Json(record))
}
