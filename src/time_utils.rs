// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.
//!
//! Input dates are parsed leniently and always interpreted in UTC. Entry
//! dates are stored and returned in the fixed display form produced by
//! [`format_display_date`], e.g. `Mon Jan 01 2024`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Display form for entry dates.
pub const DISPLAY_DATE_FORMAT: &str = "%a %b %d %Y";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// `%B` accepts both full and abbreviated month names when parsing.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    DISPLAY_DATE_FORMAT,
    "%B %d %Y",
    "%B %d, %Y",
    "%d %B %Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
];

/// Format a UTC timestamp as RFC3339 with nanosecond precision and a `Z`
/// suffix. The fixed width keeps lexicographic order equal to time order.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Format an instant in the entry display form (`Mon Jan 01 2024`).
pub fn format_display_date(date: DateTime<Utc>) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Today's date in the entry display form.
pub fn today_display_date() -> String {
    format_display_date(Utc::now())
}

/// Parse a user-supplied date.
///
/// Returns `None` for empty or unrecognized input. Date-only forms resolve
/// to midnight UTC.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(input) {
        return Some(date.with_timezone(&Utc));
    }

    if let Some(date) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
    {
        return Some(date.and_utc());
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
    {
        return Some(start_of_day(date));
    }

    parse_partial_date(input)
}

/// Parse an instant given as milliseconds since the Unix epoch.
pub fn parse_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// `YYYY` or `YYYY-MM`, resolved to the first day of the period.
fn parse_partial_date(input: &str) -> Option<DateTime<Utc>> {
    let is_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());

    let (year, month) = match input.split_once('-') {
        Some((year, month)) if is_digits(year, 4) && is_digits(month, 2) => (year, month),
        None if is_digits(input, 4) => (input, "01"),
        _ => return None,
    };

    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?;
    Some(start_of_day(date))
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
