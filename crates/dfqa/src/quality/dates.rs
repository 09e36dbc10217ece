//! Permissive calendar-date parsing.
//!
//! Accepts the shapes commonly found in exported spreadsheets and returns
//! `None` for anything else. Ambiguous numeric dates are read month-first,
//! falling back to day-first only when month-first is impossible.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

/// `2023-01-05`, `2023/1/5`, `2023.01.05`, optionally followed by a time.
static YEAR_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{4})([-/.])(\d{1,2})([-/.])(\d{1,2})(?:[T ]\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?\s*(?:Z|[+-]\d{2}:?\d{2})?)?$",
    )
    .expect("valid year-first date pattern")
});

/// `20230105`
static COMPACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").expect("valid compact date pattern"));

/// `01/05/2023`, `1-5-23`, `05.01.2023`
static NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})([-/.])(\d{1,2})([-/.])(\d{4}|\d{2})$").expect("valid numeric date pattern")
});

/// `Jan 5 2023`, `January 5th, 2023`
static MONTH_DAY_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([a-z]{3,9})\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})$")
        .expect("valid month-name date pattern")
});

/// `5 Jan 2023`, `5th January, 2023`
static DAY_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?:st|nd|rd|th)?\s+([a-z]{3,9})\.?,?\s+(\d{4})$")
        .expect("valid day-first month-name date pattern")
});

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parse a string as a calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(caps) = YEAR_FIRST.captures(s) {
        if caps[2] != caps[4] {
            return None;
        }
        return ymd(&caps[1], &caps[3], &caps[5]);
    }

    if let Some(caps) = COMPACT.captures(s) {
        return ymd(&caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = NUMERIC.captures(s) {
        if caps[2] != caps[4] {
            return None;
        }
        let year = expand_year(&caps[5])?;
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, first, second)
            .or_else(|| NaiveDate::from_ymd_opt(year, second, first));
    }

    if let Some(caps) = MONTH_DAY_YEAR.captures(s) {
        let month = month_from_name(&caps[1])?;
        return NaiveDate::from_ymd_opt(caps[3].parse().ok()?, month, caps[2].parse().ok()?);
    }

    if let Some(caps) = DAY_MONTH_YEAR.captures(s) {
        let month = month_from_name(&caps[2])?;
        return NaiveDate::from_ymd_opt(caps[3].parse().ok()?, month, caps[1].parse().ok()?);
    }

    None
}

/// Canonical `YYYY-MM-DD` rendering of a parsed date.
pub fn canonical_form(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Two-digit years pivot at 69, matching POSIX `%y`.
fn expand_year(year: &str) -> Option<i32> {
    let y: i32 = year.parse().ok()?;
    Some(match year.len() {
        2 if y < 69 => 2000 + y,
        2 => 1900 + y,
        _ => y,
    })
}

/// Full English month names or any prefix of at least three letters.
fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .position(|full| lower.len() >= 3 && full.starts_with(lower.as_str()))
        .map(|idx| idx as u32 + 1)
}
