//! Match-score extraction.
//!
//! Strategies, in order:
//! 1. a line that starts with a score label followed by a number (`SCORE: 85%`)
//! 2. a score label with a colon anywhere in a line (`Overall match score: 0.85`)
//! 3. a bare `<number>%` anywhere
//! 4. `DEFAULT_SCORE`
//!
//! The raw number is then scaled: `<= 1` is a fraction (x100), `<= 10` is a
//! 0-10 rating (x10), anything else is already a percentage. This misreads
//! small percentages like `8%` as a rating (80); that ambiguity is accepted.

use once_cell::sync::Lazy;
use regex::Regex;

/// Score used when the completion contains no usable number.
pub const DEFAULT_SCORE: u8 = 50;

static LINE_ANCHORED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^[ \t>#*_\-]*(?:match[ _]score|score|match)[ \t*_#:=]*(?:-[ \t]+)?(-?\d+(?:\.\d+)?)",
    )
    .expect("line-anchored score regex is valid")
});

static INLINE_LABELED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:match[ _]score|score)\b[ \t*_]*[:=][ \t*_]*(-?\d+(?:\.\d+)?)")
        .expect("inline score regex is valid")
});

static BARE_PERCENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("bare percent regex is valid")
});

/// Extracts and normalizes the match score. Always returns a value in `0..=100`.
pub fn extract_score(text: &str) -> u8 {
    [&*LINE_ANCHORED, &*INLINE_LABELED, &*BARE_PERCENT]
        .iter()
        .find_map(|pattern| first_number(pattern, text))
        .map(normalize_score)
        .unwrap_or(DEFAULT_SCORE)
}

fn first_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
        .find(|n| n.is_finite())
}

/// Scales a raw number onto 0-100 and clamps it.
pub fn normalize_score(raw: f64) -> u8 {
    let scaled = if raw <= 1.0 {
        raw * 100.0
    } else if raw <= 10.0 {
        raw * 10.0
    } else {
        raw
    };
    scaled.clamp(0.0, 100.0).round() as u8
}
