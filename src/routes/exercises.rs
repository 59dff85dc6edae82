// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise logging and log queries.

use crate::error::{AppError, Result};
use crate::routes::extract::{JsonOrForm, QueryPairs, UserId};
use crate::services::{parse_leading_int, ExerciseLog, LogFilter};
use crate::time_utils::{parse_date, parse_epoch_millis};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Exercise routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/{id}/exercises", post(add_exercise))
        .route("/api/users/{id}/logs", get(get_log))
}

// ─── Add Exercise ────────────────────────────────────────────

/// A scalar body field. Form bodies always carry text; JSON bodies may
/// carry numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Integer value, truncating fractions and reading text leniently.
    fn to_integer(&self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(*n),
            Scalar::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Scalar::Float(_) => None,
            Scalar::Text(s) => parse_leading_int(s),
        }
    }

    /// Date value; numbers are epoch milliseconds.
    fn to_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Scalar::Int(ms) => parse_epoch_millis(*ms),
            Scalar::Float(ms) if ms.is_finite() => parse_epoch_millis(ms.trunc() as i64),
            Scalar::Float(_) => None,
            Scalar::Text(s) => parse_date(s),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AddExerciseRequest {
    description: String,
    duration: Scalar,
    #[serde(default)]
    date: Option<Scalar>,
}

/// Response for an appended exercise.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct AddExerciseResponse {
    pub username: String,
    pub description: String,
    pub duration: i64,
    pub date: String,
    #[serde(rename = "_id")]
    pub id: String,
}

/// Append an exercise to a user's log.
///
/// An omitted or unparsable date falls back to today.
async fn add_exercise(
    State(state): State<Arc<AppState>>,
    UserId(id): UserId,
    JsonOrForm(body): JsonOrForm<AddExerciseRequest>,
) -> Result<Json<AddExerciseResponse>> {
    let duration = body.duration.to_integer().ok_or_else(|| {
        AppError::BadRequest("duration must be an integer".to_string())
    })?;
    let date = body.date.as_ref().and_then(Scalar::to_date);

    let (user, entry) = state
        .store
        .append_entry(&id, body.description, duration, date)
        .await?;

    Ok(Json(AddExerciseResponse {
        username: user.username,
        description: entry.description,
        duration: entry.duration,
        date: entry.date,
        id: user.id.to_string(),
    }))
}

// ─── Logs ────────────────────────────────────────────────────

/// Get a user's exercise log.
///
/// Filter parameters are read as raw text so bad values are ignored rather
/// than rejecting the request. A repeated parameter uses its first value.
async fn get_log(
    State(state): State<Arc<AppState>>,
    UserId(id): UserId,
    query: QueryPairs,
) -> Result<Json<ExerciseLog>> {
    let filter = LogFilter::from_query(
        query.first("from"),
        query.first("to"),
        query.first("limit"),
    );

    tracing::debug!(
        user_id = %id,
        from = ?filter.from,
        to = ?filter.to,
        limit = ?filter.limit,
        "Fetching exercise log"
    );

    let user = state.store.find_user(&id).await?;
    Ok(Json(ExerciseLog::build(&user, &filter)))
}
