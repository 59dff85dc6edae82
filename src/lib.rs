// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise Tracker: register users and keep a log of their exercises
//!
//! This crate provides the HTTP API for creating users, appending exercise
//! entries, and querying a date-filtered, newest-first view of each log.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Store;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Store,
}
