//! Analysis Orchestrator: sequences extraction, prompt, completion and parsing.
//!
//! Flow: validating → completing → parsed.
//! Failure terminals: validating → rejected (no provider call is made),
//! completing → degraded (provider error, timeout or empty completion).
//!
//! Only `rejected` surfaces as an `Err`. A provider failure is folded into a
//! well-formed low-confidence result so callers always have something to render.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::models::{AnalysisRequest, AnalysisResult, AnalysisStatus, ScoreBreakdown};
use crate::analysis::parser::parse_completion;
use crate::analysis::parser::text::{truncate_with_ellipsis, DEFAULT_SEARCH_QUERY, MAX_SUMMARY_CHARS};
use crate::analysis::prompts::build_analysis_prompt;
use crate::extractor::TextExtractor;
use crate::llm_client::{CompletionProvider, LlmError};

/// Score reported when the provider failed. Low but non-zero, so a degraded
/// result is distinguishable from a rejected one (which scores 0).
pub const DEGRADED_SCORE: u8 = 10;
pub const DEGRADED_SENTINEL: &str = "AI service error";
pub const REJECTED_SENTINEL: &str = "Input too short";

/// Minimum input lengths checked before any provider call.
#[derive(Debug, Clone, Copy)]
pub struct InputLimits {
    pub min_resume_chars: usize,
    pub min_job_description_chars: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            min_resume_chars: 50,
            min_job_description_chars: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Resume text is too short ({len} characters, need at least {min}). Upload a text-based PDF rather than a scanned image.")]
    ResumeTooShort { len: usize, min: usize },

    #[error("Job description is too short ({len} characters, need at least {min}). Paste the full posting.")]
    JobDescriptionTooShort { len: usize, min: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

impl OrchestratorError {
    /// The canned low-confidence shape for a rejected request.
    pub fn to_result(&self) -> AnalysisResult {
        let OrchestratorError::InvalidInput(input) = self;
        AnalysisResult {
            match_score: 0,
            missing_keywords: vec![REJECTED_SENTINEL.to_string()],
            summary: input.to_string(),
            feedback: "Provide a readable resume and a complete job description, then try again."
                .to_string(),
            search_query: DEFAULT_SEARCH_QUERY.to_string(),
            score_breakdown: ScoreBreakdown::default(),
            resume_tips: vec![],
            status: AnalysisStatus::Rejected,
        }
    }
}

/// The fixed shape returned when the provider failed. The cause is surfaced in
/// `summary` for diagnosability.
pub fn degraded_result(cause: &LlmError) -> AnalysisResult {
    AnalysisResult {
        match_score: DEGRADED_SCORE,
        missing_keywords: vec![DEGRADED_SENTINEL.to_string()],
        summary: truncate_with_ellipsis(&format!("Analysis failed: {cause}"), MAX_SUMMARY_CHARS),
        feedback: "The AI service is currently busy or misconfigured. Please try again shortly."
            .to_string(),
        search_query: DEFAULT_SEARCH_QUERY.to_string(),
        score_breakdown: ScoreBreakdown::default(),
        resume_tips: vec![],
        status: AnalysisStatus::Degraded,
    }
}

/// Checks both inputs against the minimum lengths, in characters after trimming.
pub fn validate_request(
    request: &AnalysisRequest,
    limits: &InputLimits,
) -> Result<(), InputError> {
    let resume_len = request.resume_text.trim().chars().count();
    if resume_len < limits.min_resume_chars {
        return Err(InputError::ResumeTooShort {
            len: resume_len,
            min: limits.min_resume_chars,
        });
    }

    let jd_len = request.job_description.trim().chars().count();
    if jd_len < limits.min_job_description_chars {
        return Err(InputError::JobDescriptionTooShort {
            len: jd_len,
            min: limits.min_job_description_chars,
        });
    }

    Ok(())
}

/// Stateless per request; shared across handlers behind an `Arc`.
pub struct Analyzer {
    provider: Arc<dyn CompletionProvider>,
    extractor: Arc<dyn TextExtractor>,
    limits: InputLimits,
    provider_timeout: Duration,
}

impl Analyzer {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        extractor: Arc<dyn TextExtractor>,
        limits: InputLimits,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            extractor,
            limits,
            provider_timeout,
        }
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Extracts resume text from an uploaded document, then analyzes it.
    pub async fn analyze_document(
        &self,
        document: Bytes,
        job_description: String,
    ) -> Result<AnalysisResult, OrchestratorError> {
        let size = document.len();
        let resume_text = self.extractor.extract(document).await;
        info!(
            "Extracted {} chars of resume text from {} byte upload",
            resume_text.chars().count(),
            size
        );

        self.analyze(&AnalysisRequest {
            resume_text,
            job_description,
        })
        .await
    }

    /// Runs validation, completion and parsing for one request.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, OrchestratorError> {
        info!(
            "Analysis validating: resume={} chars, job_description={} chars",
            request.resume_text.chars().count(),
            request.job_description.chars().count()
        );

        if let Err(e) = validate_request(request, &self.limits) {
            warn!("Analysis rejected: {e}");
            return Err(e.into());
        }

        let prompt = build_analysis_prompt(&request.job_description, &request.resume_text);
        info!("Analysis completing via {}", self.provider.model());

        let completion =
            match tokio::time::timeout(self.provider_timeout, self.provider.complete(&prompt))
                .await
            {
                Ok(Ok(text)) if !text.trim().is_empty() => text,
                Ok(Ok(_)) => return Ok(self.degrade(LlmError::EmptyContent)),
                Ok(Err(e)) => return Ok(self.degrade(e)),
                Err(_) => return Ok(self.degrade(LlmError::Timeout(self.provider_timeout))),
            };

        let result = parse_completion(&completion);
        info!(
            "Analysis parsed: score={}, missing_keywords={}",
            result.match_score,
            result.missing_keywords.len()
        );
        Ok(result)
    }

    fn degrade(&self, cause: LlmError) -> AnalysisResult {
        warn!("Analysis degraded: {cause}");
        degraded_result(&cause)
    }
}
