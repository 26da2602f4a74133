//! List-valued fields: missing keywords, score breakdown and resume tips.
//!
//! A labeled block is read as bullet lines when it has any, otherwise as a
//! comma-separated paragraph. Providers switch between the two layouts freely.

use once_cell::sync::Lazy;
use regex::Regex;

use super::sections::{Label, Sections};

pub const MAX_KEYWORDS: usize = 8;
pub const MAX_TIPS: usize = 6;
/// Emitted instead of an empty keyword list.
pub const NO_GAPS_SENTINEL: &str = "No specific gaps identified";

pub const MIN_ITEM_CHARS: usize = 3;
pub const MAX_ITEM_CHARS: usize = 99;
const MAX_TIP_CHARS: usize = 300;
const EMPTY_MARKERS: &[&str] = &["none", "n/a", "nothing", "none identified"];

static BULLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[-•*+]|\d{1,2}[.)])\s+(.+)$").expect("bullet regex is valid")
});

static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)\n]*\)").expect("parenthetical regex is valid"));

static ABBREVIATIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:e\.g\.?|i\.e\.?|etc\b\.?)").expect("abbreviation regex is valid")
});

static FILLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:specific|technologies|technology|tools)\b")
        .expect("filler regex is valid")
});

static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*+|`+|__+").expect("emphasis regex is valid"));

/// Missing keywords, capped at `MAX_KEYWORDS`, never empty.
pub fn extract_missing_keywords(sections: &Sections) -> Vec<String> {
    let keywords = extract_keyword_list(sections, Label::Missing);
    if keywords.is_empty() {
        vec![NO_GAPS_SENTINEL.to_string()]
    } else {
        keywords
    }
}

/// Keyword-style list under `label`; empty when the label is absent.
pub fn extract_keyword_list(sections: &Sections, label: Label) -> Vec<String> {
    sections
        .block(label)
        .map(|block| split_items(&PARENTHETICAL.replace_all(block, " ")))
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| clean_keyword(&item))
        .take(MAX_KEYWORDS)
        .collect()
}

/// Resume tips: bullet lines, or each non-empty line when the model skipped bullets.
pub fn extract_resume_tips(sections: &Sections) -> Vec<String> {
    let Some(block) = sections.block(Label::ResumeTips) else {
        return Vec::new();
    };

    let mut lines = bullet_items(block);
    if lines.is_empty() {
        lines = block
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
    }

    lines
        .iter()
        .map(|line| collapse_whitespace(&EMPHASIS.replace_all(line, "")))
        .filter(|tip| (MIN_ITEM_CHARS..=MAX_TIP_CHARS).contains(&tip.chars().count()))
        .take(MAX_TIPS)
        .collect()
}

/// Splits a block into raw items.
///
/// Inline content on the label line is the list itself, split on commas, and
/// any bullets below it are commentary. With nothing inline, bullet lines are
/// the items, else the first paragraph is split on commas.
fn split_items(block: &str) -> Vec<String> {
    let inline = block.lines().next().unwrap_or_default();
    if !inline.trim().is_empty() && !BULLET.is_match(inline) {
        return comma_items(block);
    }

    let bullets = bullet_items(block);
    if bullets.is_empty() {
        comma_items(block)
    } else {
        bullets
    }
}

fn bullet_items(block: &str) -> Vec<String> {
    block
        .lines()
        .filter_map(|line| BULLET.captures(line))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .collect()
}

/// Comma items from the leading paragraph, which ends at a blank or bullet line.
fn comma_items(block: &str) -> Vec<String> {
    let paragraph = block
        .trim_start()
        .lines()
        .take_while(|line| !line.trim().is_empty() && !BULLET.is_match(line))
        .collect::<Vec<_>>()
        .join(" ");

    paragraph.split(',').map(|s| s.trim().to_string()).collect()
}

fn clean_keyword(raw: &str) -> Option<String> {
    let without_abbrev = ABBREVIATIONS.replace_all(raw, " ");
    let without_filler = FILLER.replace_all(&without_abbrev, " ");
    let without_emphasis = EMPHASIS.replace_all(&without_filler, "");

    let keyword = collapse_whitespace(&without_emphasis)
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '“' | '”' | '[' | ']' | ':' | ';'))
        .trim_end_matches(|c: char| matches!(c, '.' | ','))
        .trim()
        .to_string();

    let len = keyword.chars().count();
    if !(MIN_ITEM_CHARS..=MAX_ITEM_CHARS).contains(&len) {
        return None;
    }
    if EMPTY_MARKERS.contains(&keyword.to_lowercase().as_str()) {
        return None;
    }
    Some(keyword)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
