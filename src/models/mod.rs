// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod exercise;
pub mod id;
pub mod user;

pub use exercise::{Entry, ExerciseRecord};
pub use id::{InvalidObjectId, ObjectId};
pub use user::{User, UserRecord, UserSummary, UsernameClaim};
