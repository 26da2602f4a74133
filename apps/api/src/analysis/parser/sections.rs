//! Label-anchored block scanning.
//!
//! A label is a known marker at the start of a line (`SCORE:`, `**Summary:**`,
//! `### Missing Keywords`), optionally decorated with markdown. The block of a
//! label is everything after it up to the next label line or end of text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Section labels the parser understands, after synonym folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Score,
    Missing,
    Summary,
    Feedback,
    SearchQuery,
    Strengths,
    Partial,
    Weak,
    ResumeTips,
}

impl Label {
    fn from_marker(marker: &str) -> Option<Self> {
        let folded = marker
            .to_lowercase()
            .replace('_', " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        match folded.as_str() {
            "score" | "match score" | "match" => Some(Label::Score),
            "missing" | "missing keywords" => Some(Label::Missing),
            "summary" | "initial impression" | "assessment" => Some(Label::Summary),
            "feedback" => Some(Label::Feedback),
            "search query" => Some(Label::SearchQuery),
            "strengths" => Some(Label::Strengths),
            "partial" => Some(Label::Partial),
            "weak" => Some(Label::Weak),
            "resume tips" => Some(Label::ResumeTips),
            _ => None,
        }
    }
}

// Longer synonyms come first so `Missing Keywords:` is not read as `Missing` + prose.
const MARKERS: &str = r"match[ _]score|score|match|missing[ _]keywords|missing|summary|initial[ _]impression|assessment|feedback|search[ _]query|strengths|partial|weak|resume[ _]tips";

/// A label line: heading/quote marks, emphasis hugging the marker, then a colon
/// or end of line. Emphasis must touch the marker, so a `* Summary:` bullet is
/// list content rather than a new section.
static LABEL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?im)^[ \t>#]*(?:\*{{1,3}}|_{{1,2}})?({MARKERS})[ \t*_#]*(?::[ \t*_]*|$)"
    ))
    .expect("label regex is valid")
});

/// A label mentioned anywhere in a line, used to reject fallback prose.
static LABEL_MENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)match score|missing keywords|\b(?:{MARKERS})\b[ \t*_]*:"
    ))
    .expect("label mention regex is valid")
});

#[derive(Debug, Clone, Copy)]
struct LabelHit {
    label: Label,
    line_start: usize,
    body_start: usize,
}

/// A completion split into its labeled blocks. Scanned once, queried per field.
#[derive(Debug)]
pub struct Sections<'a> {
    text: &'a str,
    hits: Vec<LabelHit>,
}

impl<'a> Sections<'a> {
    pub fn scan(text: &'a str) -> Self {
        let hits = LABEL_LINE
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let label = Label::from_marker(caps.get(1)?.as_str())?;
                Some(LabelHit {
                    label,
                    line_start: whole.start(),
                    body_start: whole.end(),
                })
            })
            .collect();

        Self { text, hits }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Returns the first non-blank block for `label`, untrimmed.
    pub fn block(&self, label: Label) -> Option<&'a str> {
        self.hits
            .iter()
            .enumerate()
            .filter(|(_, hit)| hit.label == label)
            .map(|(idx, hit)| {
                let end = self
                    .hits
                    .get(idx + 1)
                    .map(|next| next.line_start)
                    .unwrap_or(self.text.len());
                &self.text[hit.body_start..end.max(hit.body_start)]
            })
            .find(|body| !body.trim().is_empty())
    }
}

/// True when the line is itself a label line or names a label inline.
pub fn mentions_label(line: &str) -> bool {
    LABEL_LINE.is_match(line) || LABEL_MENTION.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRUCTURED: &str = "SCORE: 72%\nMISSING: Docker, Kubernetes\nSUMMARY: Decent alignment.\nFEEDBACK: Add more cloud experience.\nSEARCH_QUERY: Backend Engineer";

    #[test]
    fn test_blocks_end_at_next_label() {
        let sections = Sections::scan(STRUCTURED);
        assert_eq!(sections.block(Label::Missing).unwrap().trim(), "Docker, Kubernetes");
        assert_eq!(sections.block(Label::Summary).unwrap().trim(), "Decent alignment.");
        assert_eq!(sections.block(Label::Score).unwrap().trim(), "72%");
    }

    #[test]
    fn test_last_block_runs_to_end_of_text() {
        let sections = Sections::scan(STRUCTURED);
        assert_eq!(sections.block(Label::SearchQuery).unwrap(), "Backend Engineer");
    }

    #[test]
    fn test_missing_label_yields_none() {
        let sections = Sections::scan(STRUCTURED);
        assert!(sections.block(Label::Strengths).is_none());
        assert!(sections.block(Label::ResumeTips).is_none());
    }

    #[test]
    fn test_markdown_decorated_labels() {
        let text = "**Match Score:** 80%\n### Missing Keywords\n- Go\n- gRPC\n**Summary**: Strong fit.";
        let sections = Sections::scan(text);
        assert_eq!(sections.block(Label::Score).unwrap().trim(), "80%");
        assert_eq!(sections.block(Label::Missing).unwrap().trim(), "- Go\n- gRPC");
        assert_eq!(sections.block(Label::Summary).unwrap().trim(), "Strong fit.");
    }

    #[test]
    fn test_synonyms_fold_to_same_label() {
        let text = "Initial Impression:\nSolid backend profile.\nMissing Keywords:\n- Terraform";
        let sections = Sections::scan(text);
        assert_eq!(sections.block(Label::Summary).unwrap().trim(), "Solid backend profile.");
        assert_eq!(sections.block(Label::Missing).unwrap().trim(), "- Terraform");
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        let sections = Sections::scan("summary: lower\nFeedback: mixed");
        assert_eq!(sections.block(Label::Summary).unwrap().trim(), "lower");
        assert_eq!(sections.block(Label::Feedback).unwrap().trim(), "mixed");
    }

    #[test]
    fn test_star_bullets_naming_a_label_stay_in_the_block() {
        let text = "FEEDBACK:\n* **Summary:** Lead with a two-line summary of platform work.\n* Strengths: call out the Kafka migration.\n* Add throughput metrics.\nSEARCH_QUERY: Backend Engineer";
        let sections = Sections::scan(text);
        let feedback = sections.block(Label::Feedback).unwrap();
        assert!(feedback.contains("Lead with a two-line summary"));
        assert!(feedback.contains("Add throughput metrics."));
        assert!(sections.block(Label::Summary).is_none());
        assert!(sections.block(Label::Strengths).is_none());
        assert_eq!(sections.block(Label::SearchQuery).unwrap(), "Backend Engineer");
    }

    #[test]
    fn test_emphasis_hugging_the_marker_is_still_a_label() {
        let sections = Sections::scan("*Summary:* Fine.\n__Feedback__: More.\n> ### Strengths\n- Go");
        assert_eq!(sections.block(Label::Summary).unwrap().trim(), "Fine.");
        assert_eq!(sections.block(Label::Feedback).unwrap().trim(), "More.");
        assert_eq!(sections.block(Label::Strengths).unwrap().trim(), "- Go");
    }

    #[test]
    fn test_prose_starting_with_label_word_is_not_a_label() {
        let sections = Sections::scan("Summary of findings follows below.\nMatching skills are many.");
        assert!(sections.block(Label::Summary).is_none());
        assert!(sections.block(Label::Score).is_none());
    }

    #[test]
    fn test_blank_block_skipped_for_later_occurrence() {
        let sections = Sections::scan("SUMMARY:\nFEEDBACK: x\nSUMMARY: second try");
        assert_eq!(sections.block(Label::Summary).unwrap().trim(), "second try");
    }

    #[test]
    fn test_mentions_label() {
        assert!(mentions_label("SCORE: 90%"));
        assert!(mentions_label("The match score here is high and the summary: good"));
        assert!(!mentions_label("The candidate has strong distributed systems experience."));
    }

    #[test]
    fn test_empty_text_has_no_blocks() {
        let sections = Sections::scan("");
        assert!(sections.block(Label::Summary).is_none());
        assert_eq!(sections.text(), "");
    }
}
