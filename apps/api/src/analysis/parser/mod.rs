//! Response parser: turns a free-text completion into a bounded `AnalysisResult`.
//!
//! Never fails. Every field has an ordered list of extraction strategies that
//! ends in a default, so any input (including an empty string) yields a value
//! that satisfies the `AnalysisResult` invariants. Fields are extracted
//! independently of each other and of label order.

pub mod lists;
pub mod score;
pub mod sections;
pub mod text;

use crate::analysis::models::{AnalysisResult, AnalysisStatus, ScoreBreakdown};

use lists::{extract_keyword_list, extract_missing_keywords, extract_resume_tips};
use score::extract_score;
use sections::{Label, Sections};
use text::{extract_feedback, extract_search_query, extract_summary};

/// Parses a raw completion. Pure: the same text always yields an equal result.
pub fn parse_completion(raw: &str) -> AnalysisResult {
    let text = raw.replace("\r\n", "\n");
    let sections = Sections::scan(&text);

    AnalysisResult {
        match_score: extract_score(&text),
        missing_keywords: extract_missing_keywords(&sections),
        summary: extract_summary(&sections),
        feedback: extract_feedback(&sections),
        search_query: extract_search_query(&sections),
        score_breakdown: ScoreBreakdown {
            strengths: extract_keyword_list(&sections, Label::Strengths),
            partial: extract_keyword_list(&sections, Label::Partial),
            missing: extract_keyword_list(&sections, Label::Weak),
        },
        resume_tips: extract_resume_tips(&sections),
        status: AnalysisStatus::Ok,
    }
}
