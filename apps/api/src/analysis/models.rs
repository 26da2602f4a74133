use serde::{Deserialize, Serialize};

/// Ephemeral input to the orchestrator: extracted resume text plus the pasted JD.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description: String,
}

/// How an `AnalysisResult` came to be. Serialized as `"ok" | "degraded" | "rejected"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    /// The completion was parsed. Parse ambiguity is absorbed by field defaults.
    #[default]
    Ok,
    /// The provider failed; the result is a fixed low-confidence shape.
    Degraded,
    /// Inputs failed validation before any provider call.
    Rejected,
}

/// Keyword-level breakdown of how the resume covers the JD.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub partial: Vec<String>,
    #[serde(default)]
    pub missing: Vec<String>,
}

/// The normalized, user-facing result. Field names are the wire contract
/// consumed by existing front ends.
///
/// Invariants (upheld by the parser and the canned constructors):
/// - `match_score` is in `0..=100`
/// - `missing_keywords` is never empty, each entry 3..=99 chars, at most 8 entries
/// - `summary` is at most 400 chars with no markdown or control characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub match_score: u8,
    pub missing_keywords: Vec<String>,
    pub summary: String,
    pub feedback: String,
    pub search_query: String,
    #[serde(default)]
    pub score_breakdown: ScoreBreakdown,
    #[serde(default)]
    pub resume_tips: Vec<String>,
    #[serde(default)]
    pub status: AnalysisStatus,
}
