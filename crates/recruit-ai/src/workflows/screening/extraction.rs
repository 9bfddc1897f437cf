//! Best-effort field extraction from the visible text of a candidate card.
//!
//! Every field is matched independently and falls back to `None` when its
//! pattern is missing, so extraction never fails.

use std::sync::OnceLock;

use regex::Regex;

use super::domain::{EducationLevel, ParsedCandidate, SalaryBound, OFF_THE_JOB_STATUS};

const NEGOTIABLE_MARKER: &str = "面议";
const EXPECTATION_MARKER: &str = "期望";

/// Explicit status phrases, checked in priority order.
const STATUS_PATTERNS: [&str; 7] = [
    OFF_THE_JOB_STATUS,
    "在职-月内到岗",
    "在职-考虑机会",
    "在职-暂不考虑",
    r"\d{2}年应届生",
    r"\d{2}年毕业",
    "应届生",
];

struct Patterns {
    salary_range: Regex,
    leading_token: Regex,
    name_after_negotiable: Regex,
    age: Regex,
    education: Regex,
    statuses: Vec<Regex>,
    age_years_window: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        salary_range: compile(r"(\d+)-(\d+)K"),
        leading_token: compile(r"\A\s*(\S+)"),
        name_after_negotiable: compile(r"面议\s*(\S+)"),
        age: compile(r"(\d+)岁"),
        education: compile(r"初中及以下|高中|中专/中技|中专|中技|大专|本科|硕士|博士"),
        statuses: STATUS_PATTERNS.iter().map(|pattern| compile(pattern)).collect(),
        age_years_window: compile(r"\d+岁\s*\d+年(?:以上|以内)?\s*(.+?)\s*(?:期望|优势)"),
    })
}

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("built-in extraction pattern {pattern:?} is invalid: {err}"),
    }
}

/// Parse the raw card text into a [`ParsedCandidate`].
pub fn extract_candidate(text: &str) -> ParsedCandidate {
    let patterns = patterns();
    let salary_token = find_salary_token(patterns, text);
    let negotiable = salary_token.is_none() && text.contains(NEGOTIABLE_MARKER);
    let (salary_lower, salary_upper) = match &salary_token {
        Some(token) => (
            Some(SalaryBound::Amount(token.lower)),
            Some(SalaryBound::Amount(token.upper)),
        ),
        None if negotiable => (Some(SalaryBound::Negotiable), Some(SalaryBound::Negotiable)),
        None => (None, None),
    };
    let name = extract_name(patterns, text, salary_token.as_ref(), negotiable);
    let age = patterns
        .age
        .captures(text)
        .and_then(|caps| caps[1].parse::<u32>().ok());

    let education_match = patterns.education.find(text);
    let education = education_match.and_then(|found| EducationLevel::from_label(found.as_str()));
    let employment_status =
        extract_status(patterns, text, education_match.map(|found| found.end()));

    ParsedCandidate {
        salary_lower,
        salary_upper,
        name,
        age,
        education,
        employment_status,
    }
}

/// A `N-MK` salary range and the byte offset just past its unit.
struct SalaryToken {
    lower: u32,
    upper: u32,
    end: usize,
}

/// First `N-MK` token whose `K` is not the start of a longer word such as `Kafka`.
fn find_salary_token(patterns: &Patterns, text: &str) -> Option<SalaryToken> {
    patterns.salary_range.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        if text[whole.end()..]
            .chars()
            .next()
            .is_some_and(|next| next.is_ascii_alphanumeric())
        {
            return None;
        }
        Some(SalaryToken {
            lower: caps[1].parse::<u32>().ok()?.checked_mul(1000)?,
            upper: caps[2].parse::<u32>().ok()?.checked_mul(1000)?,
            end: whole.end(),
        })
    })
}

fn extract_name(
    patterns: &Patterns,
    text: &str,
    salary: Option<&SalaryToken>,
    negotiable: bool,
) -> Option<String> {
    let caps = match salary {
        Some(token) => patterns.leading_token.captures(&text[token.end..]),
        None if negotiable => patterns.name_after_negotiable.captures(text),
        None => None,
    }?;
    Some(caps[1].to_string())
}

fn extract_status(patterns: &Patterns, text: &str, education_end: Option<usize>) -> Option<String> {
    if let Some(found) = patterns
        .statuses
        .iter()
        .find_map(|pattern| pattern.find(text))
    {
        return Some(found.as_str().to_string());
    }

    if let Some(span) = education_end.and_then(|end| education_window(text, end)) {
        return Some(span);
    }

    patterns
        .age_years_window
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|span| !span.is_empty())
}

fn education_window(text: &str, education_end: usize) -> Option<String> {
    let tail = &text[education_end..];
    let stop = tail.find(EXPECTATION_MARKER)?;
    let span = tail[..stop].trim();
    if span.is_empty() {
        None
    } else {
        Some(span.to_string())
    }
}
