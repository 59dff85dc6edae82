// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise log queries.
//!
//! A log is the view of a user's entries narrowed by an optional inclusive
//! date range, newest first, optionally truncated:
//! 1. Keep entries dated on or after `from`
//! 2. Keep entries dated on or before `to`
//! 3. Reverse into most-recently-appended order
//! 4. Keep the first `limit` entries
//!
//! Malformed bounds and non-positive limits are ignored rather than
//! rejected.

use crate::models::{Entry, ObjectId, User};
use crate::time_utils::parse_date;
use chrono::{DateTime, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Narrowing applied to a user's entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// Inclusive lower bound
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound
    pub to: Option<DateTime<Utc>>,
    /// Maximum number of entries to return
    pub limit: Option<usize>,
}

impl LogFilter {
    /// Build a filter from raw query-string values, dropping any that do not
    /// parse.
    pub fn from_query(from: Option<&str>, to: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            from: from.and_then(parse_date),
            to: to.and_then(parse_date),
            limit: limit
                .and_then(parse_leading_int)
                .filter(|&n| is_positive_integer(n))
                .and_then(|n| usize::try_from(n).ok()),
        }
    }

    /// Apply the filter. Stored order is untouched; a new view is returned.
    pub fn apply(&self, entries: &[Entry]) -> Vec<Entry> {
        let mut log: Vec<&Entry> = entries.iter().filter(|e| self.in_range(e)).collect();
        log.reverse();
        if let Some(limit) = self.limit {
            log.truncate(limit);
        }
        log.into_iter().cloned().collect()
    }

    fn in_range(&self, entry: &Entry) -> bool {
        if self.from.is_none() && self.to.is_none() {
            return true;
        }

        // Entries whose stored date no longer parses cannot satisfy a bound.
        let Some(date) = parse_date(&entry.date) else {
            return false;
        };

        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Whether a parsed limit should be applied.
pub fn is_positive_integer(n: i64) -> bool {
    n > 0
}

/// Read an integer the lenient way: skip leading whitespace, accept an
/// optional sign, then take the leading run of digits. `"2abc"` is 2,
/// `"abc"` is `None`.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value: i64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// A user's filtered log, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct ExerciseLog {
    pub username: String,
    /// Number of entries in `log`
    pub count: usize,
    #[serde(rename = "_id")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub id: ObjectId,
    pub log: Vec<Entry>,
}

impl ExerciseLog {
    pub fn build(user: &User, filter: &LogFilter) -> Self {
        let log = filter.apply(&user.exercises);
        Self {
            username: user.username.clone(),
            count: log.len(),
            id: user.id,
            log,
        }
    }
}
