// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise entry model for storage and API.

use crate::models::ObjectId;
use crate::time_utils::{format_display_date, today_display_date};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One exercise entry in a user's log.
///
/// The entry id is internal: it never appears in API output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct Entry {
    #[serde(skip)]
    id: ObjectId,
    pub description: String,
    /// Unvalidated; may be zero or negative.
    pub duration: i64,
    /// Display form, e.g. `Mon Jan 01 2024`.
    pub date: String,
}

impl Entry {
    /// Build a new entry. A missing date defaults to today.
    pub fn new(description: String, duration: i64, date: Option<DateTime<Utc>>) -> Self {
        let date = date.map_or_else(today_display_date, format_display_date);
        Self {
            id: ObjectId::generate(),
            description,
            duration,
            date,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }
}

/// Stored exercise document in Firestore.
///
/// Entries live in their own collection so an append is a single document
/// create rather than a rewrite of the user document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Entry ID (also used as document ID)
    pub entry_id: ObjectId,
    /// Owning user
    pub user_id: ObjectId,
    pub description: String,
    pub duration: i64,
    pub date: String,
    /// Append time (RFC3339, nanoseconds); orders a user's entries.
    pub appended_at: String,
}

impl ExerciseRecord {
    pub fn new(user_id: ObjectId, entry: &Entry, appended_at: String) -> Self {
        Self {
            entry_id: entry.id,
            user_id,
            description: entry.description.clone(),
            duration: entry.duration,
            date: entry.date.clone(),
            appended_at,
        }
    }
}

impl From<ExerciseRecord> for Entry {
    fn from(record: ExerciseRecord) -> Self {
        Self {
            id: record.entry_id,
            description: record.description,
            duration: record.duration,
            date: record.date,
        }
    }
}
