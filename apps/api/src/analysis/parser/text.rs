//! Free-text fields: summary, feedback and search query.

use once_cell::sync::Lazy;
use regex::Regex;

use super::sections::{mentions_label, Label, Sections};

pub const DEFAULT_SUMMARY: &str = "Technical analysis completed.";
pub const DEFAULT_FEEDBACK: &str = "No specific feedback provided.";
pub const DEFAULT_SEARCH_QUERY: &str = "Software Engineer";

pub const MAX_SUMMARY_CHARS: usize = 400;
const MAX_SEARCH_QUERY_CHARS: usize = 80;
/// A labeled summary shorter than this triggers the paragraph scan.
const CONFIDENT_SUMMARY_CHARS: usize = 50;
/// A fallback paragraph line must be longer than this.
const FALLBACK_LINE_CHARS: usize = 60;
/// Anything shorter is not a summary at all.
const MIN_SUMMARY_CHARS: usize = 10;

/// Heading and quote marks at the start of a line.
static LEADING_MARKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*[#>]+").expect("leading marks regex is valid"));

static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*+|`+|__+").expect("emphasis regex is valid"));

/// Underscores at a word edge (`_italic_`). Inner ones (`snake_case`) are kept.
static EDGE_UNDERSCORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|\W)_+|_+(\W|$)").expect("edge underscore regex is valid")
});

static LIST_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[-•*+]|\d{1,2}[.)])\s").expect("list line regex is valid")
});

/// Labeled summary, else the first substantial paragraph line, else the default.
pub fn extract_summary(sections: &Sections) -> String {
    let labeled = sections
        .block(Label::Summary)
        .map(clean_inline)
        .unwrap_or_default();

    let summary = if labeled.chars().count() >= CONFIDENT_SUMMARY_CHARS {
        labeled
    } else {
        first_substantial_line(sections.text()).unwrap_or(labeled)
    };

    if summary.chars().count() < MIN_SUMMARY_CHARS {
        return DEFAULT_SUMMARY.to_string();
    }
    truncate_with_ellipsis(&summary, MAX_SUMMARY_CHARS)
}

/// Everything under `FEEDBACK:` up to the next label, trimmed.
pub fn extract_feedback(sections: &Sections) -> String {
    sections
        .block(Label::Feedback)
        .map(str::trim)
        .filter(|feedback| !feedback.is_empty())
        .unwrap_or(DEFAULT_FEEDBACK)
        .to_string()
}

/// First non-empty line under `SEARCH_QUERY:`, unquoted.
pub fn extract_search_query(sections: &Sections) -> String {
    let query = sections
        .block(Label::SearchQuery)
        .and_then(|block| block.lines().map(str::trim).find(|line| !line.is_empty()))
        .map(|line| {
            let unquoted = line.trim_matches(|c: char| {
                matches!(c, '"' | '\'' | '“' | '”' | '`' | '*' | '.') || c.is_whitespace()
            });
            clean_inline(unquoted)
        })
        .unwrap_or_default();

    if query.is_empty() {
        DEFAULT_SEARCH_QUERY.to_string()
    } else {
        truncate_chars(&query, MAX_SEARCH_QUERY_CHARS).trim_end().to_string()
    }
}

fn first_substantial_line(text: &str) -> Option<String> {
    text.lines()
        .filter(|line| !LIST_LINE.is_match(line) && !mentions_label(line))
        .map(clean_inline)
        .find(|line| line.chars().count() > FALLBACK_LINE_CHARS)
}

/// Strips markdown and control characters and collapses whitespace onto one line.
pub fn clean_inline(text: &str) -> String {
    let text = LEADING_MARKS.replace_all(text, " ");
    let text = EMPHASIS.replace_all(&text, "");
    EDGE_UNDERSCORE
        .replace_all(&text, "$1$2")
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept = truncate_chars(text, max_chars - 3);
    format!("{}...", kept.trim_end())
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
