//! Flexible date normalization for scraped event data
//!
//! Turns human-entered or scraped date strings into `YYYY-MM-DD`. Returns
//! the empty string when nothing matches: a missing date must be entered by
//! hand, while a wrongly guessed one silently breaks registration.
//!
//! Strategies, first match wins:
//! - sentinels ("Not mentioned", "Not Disclosed") and blanks: unknown
//! - `2026-01-29`: returned as is
//! - `29th Jan 2026`, `29-Jan-2026`
//! - `Jan 29th 2026`
//! - `29/01/2026`, `29-1-2026` (day first)
//! - generic formats (RFC 3339, `2026/01/29`, weekday prefixes...), only
//!   when the year is at least 2020
//!
//! The named-month and day-first shapes are searched for anywhere in the
//! text, so labels ("Deadline: ") and trailing times ("11:59 PM") are ignored.

use crate::config::{MIN_FALLBACK_YEAR, UNKNOWN_SENTINELS};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISO_DATE_RE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref DAY_MONTH_YEAR_RE: Regex =
        Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)?[\s-]+([a-z]+)\.?[\s-]+(\d{4})\b").unwrap();
    static ref MONTH_DAY_YEAR_RE: Regex =
        Regex::new(r"\b([a-z]+)\.?\s+(\d{1,2})(?:st|nd|rd|th)?\s+(\d{4})\b").unwrap();
    static ref NUMERIC_DAY_FIRST_RE: Regex =
        Regex::new(r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{4})\b").unwrap();
    static ref WEEKDAY_PREFIX_RE: Regex =
        Regex::new(r"^(?:mon|tue|tues|wed|thu|thur|thurs|fri|sat|sun)[a-z]*\.?\s+").unwrap();
}

const GENERIC_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d-%B-%Y",
];
const GENERIC_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%b %d %Y %I:%M %p",
    "%b %d, %Y %I:%M %p",
    "%d %b %Y, %I:%M %p",
    "%B %d %Y %H:%M",
];

/// True for blank input and for the upstream "left blank" markers
pub fn is_unknown(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || UNKNOWN_SENTINELS
            .iter()
            .any(|sentinel| trimmed.eq_ignore_ascii_case(sentinel))
}

/// Month number for an English month name or abbreviation (case-insensitive)
pub fn month_from_name(name: &str) -> Option<u32> {
    let month = match name.to_ascii_lowercase().trim_end_matches('.') {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

/// Normalize `raw` to `YYYY-MM-DD`, or `""` when it cannot be read
pub fn normalize_date(raw: &str) -> String {
    parse_flexible_date(raw)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .or_else(|| {
            let trimmed = raw.trim();
            ISO_DATE_RE.is_match(trimmed).then(|| trimmed.to_string())
        })
        .unwrap_or_default()
}

/// Typed variant of [`normalize_date`]
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    if is_unknown(raw) {
        return None;
    }

    let trimmed = raw.trim();
    if ISO_DATE_RE.is_match(trimmed) {
        // Shape-valid but impossible dates (2026-02-30) fall through to the
        // string path in `normalize_date`, which returns them untouched.
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok();
    }

    let cleaned = clean(trimmed);

    named_month_date(&cleaned)
        .or_else(|| numeric_day_first(&cleaned))
        .or_else(|| {
            let without_weekday = WEEKDAY_PREFIX_RE.replace(&cleaned, "");
            if without_weekday.len() != cleaned.len() {
                named_month_date(&without_weekday)
            } else {
                None
            }
        })
        .or_else(|| generic_date(trimmed))
}

/// Lowercase, commas to spaces, collapsed whitespace
fn clean(raw: &str) -> String {
    raw.to_lowercase()
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First day-month-year, then month-day-year, match with a real month name
fn named_month_date(cleaned: &str) -> Option<NaiveDate> {
    DAY_MONTH_YEAR_RE
        .captures_iter(cleaned)
        .find_map(|caps| {
            let day: u32 = caps.get(1)?.as_str().parse().ok()?;
            let month = month_from_name(caps.get(2)?.as_str())?;
            let year: i32 = caps.get(3)?.as_str().parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        })
        .or_else(|| {
            MONTH_DAY_YEAR_RE.captures_iter(cleaned).find_map(|caps| {
                let month = month_from_name(caps.get(1)?.as_str())?;
                let day: u32 = caps.get(2)?.as_str().parse().ok()?;
                let year: i32 = caps.get(3)?.as_str().parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            })
        })
}

fn numeric_day_first(cleaned: &str) -> Option<NaiveDate> {
    let caps = NUMERIC_DAY_FIRST_RE.captures(cleaned)?;
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let year: i32 = caps.get(3)?.as_str().parse().ok()?;

    if !(1..=12).contains(&month) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn generic_date(raw: &str) -> Option<NaiveDate> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            GENERIC_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            GENERIC_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        })?;

    if parsed.year() < MIN_FALLBACK_YEAR {
        tracing::debug!("Rejecting implausible date {:?} parsed from {:?}", parsed, raw);
        return None;
    }
    Some(parsed)
}
