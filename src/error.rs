// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! The taxonomy is deliberately flat: only a malformed id or request body is
//! a client error. A missing user, a duplicate username and storage failures
//! all surface as 500 with an `{error, message}` body.

use crate::models::InvalidObjectId;
use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid user ID: {0}")]
    InvalidId(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidId(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_)
            | AppError::DuplicateKey(_)
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<InvalidObjectId> for AppError {
    fn from(err: InvalidObjectId) -> Self {
        AppError::InvalidId(err.0)
    }
}

/// The only path parameter is the user id, so an undecodable path is a bad id.
impl From<PathRejection> for AppError {
    fn from(err: PathRejection) -> Self {
        AppError::InvalidId(err.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message) = match &self {
            AppError::InvalidId(id) => {
                tracing::debug!(id = %id, "Rejected malformed user ID");
                ("Invalid user ID", None)
            }
            AppError::BadRequest(msg) => ("Bad Request", Some(msg.clone())),
            AppError::NotFound(msg) => {
                tracing::warn!(error = %msg, "User not found");
                ("User not found", Some(msg.clone()))
            }
            AppError::DuplicateKey(msg) => {
                tracing::warn!(error = %msg, "Duplicate key");
                ("Internal Server Error", Some(msg.clone()))
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                ("Internal Server Error", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                ("Internal Server Error", Some(err.to_string()))
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
