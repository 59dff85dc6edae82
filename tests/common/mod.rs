// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use exercise_tracker::config::Config;
use exercise_tracker::db::{FirestoreDb, MemoryDb, Store};
use exercise_tracker::routes::create_router;
use exercise_tracker::AppState;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

fn test_config() -> Config {
    Config {
        site_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")),
        ..Config::default()
    }
}

fn app_with_store(store: Store) -> axum::Router {
    let state = Arc::new(AppState {
        config: test_config(),
        store,
    });
    create_router(state)
}

/// Create a test app backed by a fresh in-memory store.
#[allow(dead_code)]
pub fn create_test_app() -> axum::Router {
    app_with_store(Store::Memory(MemoryDb::new()))
}

/// Create a test app whose store is an offline Firestore mock; every
/// database call fails.
#[allow(dead_code)]
pub fn create_offline_app() -> axum::Router {
    app_with_store(Store::Firestore(FirestoreDb::new_mock()))
}

/// Send a request and decode the JSON response body.
#[allow(dead_code)]
pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

#[allow(dead_code)]
pub async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

#[allow(dead_code)]
pub async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[allow(dead_code)]
pub async fn post_form(app: &axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Create a user through the API and return its id.
#[allow(dead_code)]
pub async fn create_user(app: &axum::Router, username: &str) -> String {
    let (status, json) =
        post_json(app, "/api/users", serde_json::json!({ "username": username })).await;
    assert_eq!(status, StatusCode::OK, "create user failed: {}", json);
    json["_id"].as_str().unwrap().to_string()
}

/// Append an exercise through the API.
#[allow(dead_code)]
pub async fn add_exercise(
    app: &axum::Router,
    user_id: &str,
    description: &str,
    duration: i64,
    date: Option<&str>,
) -> Value {
    let mut body = serde_json::json!({ "description": description, "duration": duration });
    if let Some(date) = date {
        body["date"] = Value::from(date);
    }
    let (status, json) =
        post_json(app, &format!("/api/users/{}/exercises", user_id), body).await;
    assert_eq!(status, StatusCode::OK, "add exercise failed: {}", json);
    json
}
