// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod exercise_log;

pub use exercise_log::{is_positive_integer, parse_leading_int, ExerciseLog, LogFilter};
