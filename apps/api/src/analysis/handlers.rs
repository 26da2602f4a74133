use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;

use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::analysis::orchestrator::OrchestratorError;
use crate::errors::AppError;
use crate::state::AppState;

type AnalysisResponse = (StatusCode, Json<AnalysisResult>);

/// Rejected requests still carry a well-formed result body, under 422.
fn respond(outcome: Result<AnalysisResult, OrchestratorError>) -> AnalysisResponse {
    match outcome {
        Ok(result) => (StatusCode::OK, Json(result)),
        Err(e) => (StatusCode::UNPROCESSABLE_ENTITY, Json(e.to_result())),
    }
}

/// POST /analyze
///
/// Multipart form: `resume` (PDF file) and `jobDesc` (or `jobDescription`).
/// A missing file extracts to empty text and is rejected like an unreadable one.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<AnalysisResponse, AppError> {
    let mut document = Bytes::new();
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                document = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
            }
            "jobDesc" | "jobDescription" => {
                job_description = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job description: {e}"))
                })?;
            }
            _ => {}
        }
    }

    Ok(respond(
        state
            .analyzer
            .analyze_document(document, job_description)
            .await,
    ))
}

/// POST /analyze/text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<AnalysisResponse, AppError> {
    Ok(respond(state.analyzer.analyze(&req).await))
}
