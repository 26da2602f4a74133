// Prompt template for resume-vs-JD analysis.
// The output grammar below is a hint to the model, not a contract: the parser
// never assumes it was followed.

/// Per-input character budget. Keeps the request well under provider limits.
pub const MAX_INPUT_CHARS: usize = 3000;

/// Analysis prompt template. Replace `{job_description}` and `{resume_text}`.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an ATS (Applicant Tracking System) performing a technical resume analysis.
Analyze the resume against the job description and assess how well they align.

JOB DESCRIPTION:
"""
{job_description}
"""

RESUME:
"""
{resume_text}
"""

Output strictly in this format, one label per line, no markdown:
SCORE: <number 0-100>%
MISSING: <comma-separated list of critical skills or keywords from the job description absent from the resume>
SUMMARY: <one objective, third-person sentence summarizing the technical fit>
FEEDBACK: <3-4 bullet points with specific changes that would improve the resume for this role>
STRENGTHS: <comma-separated requirements the resume clearly covers>
PARTIAL: <comma-separated requirements the resume only partially covers>
WEAK: <comma-separated requirements the resume does not cover>
RESUME_TIPS:
- <short actionable tip>
- <short actionable tip>
SEARCH_QUERY: <the best 3-4 word job search query for this candidate, e.g. Junior React Developer Remote>

RULES:
- Be objective and technical
- List only keywords that actually appear in the job description
- Score should reflect realistic alignment"#;

/// Builds the analysis prompt. Pure: same inputs always yield the same prompt.
pub fn build_analysis_prompt(job_description: &str, resume_text: &str) -> String {
    let job_description = truncate_chars(job_description.trim(), MAX_INPUT_CHARS);
    let resume_text = truncate_chars(resume_text.trim(), MAX_INPUT_CHARS);
    fill_placeholders(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("{job_description}", job_description.as_str()),
            ("{resume_text}", resume_text.as_str()),
        ],
    )
}

/// Substitutes placeholders in one left-to-right pass over the template, so
/// braces inside an inserted value are never themselves substituted.
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, value)| value.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match values.iter().find(|(placeholder, _)| tail.starts_with(placeholder)) {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
