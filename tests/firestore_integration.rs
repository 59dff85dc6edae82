// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running and
//! FIRESTORE_EMULATOR_HOST to point at it.

use chrono::TimeZone;
use exercise_tracker::error::AppError;
use exercise_tracker::models::{Entry, ObjectId};

mod common;
use common::test_db;

/// Generate a unique username for test isolation.
fn unique_username(prefix: &str) -> String {
    format!("{}-{}", prefix, ObjectId::generate())
}

fn entry_on(description: &str, day: u32) -> Entry {
    let date = chrono::Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap();
    Entry::new(description.to_string(), day as i64, Some(date))
}

#[tokio::test]
async fn test_create_and_find_user() {
    require_emulator!();

    let db = test_db().await;
    let username = unique_username("create");

    let user = db.create_user(&username).await.unwrap();
    assert!(user.exercises.is_empty());

    let fetched = db.find_user(user.id).await.unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.username, username);
    assert!(fetched.exercises.is_empty());

    println!("✓ User created and fetched: id={}", user.id);
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    require_emulator!();

    let db = test_db().await;
    let username = unique_username("dup");

    db.create_user(&username).await.unwrap();
    let err = db.create_user(&username).await.unwrap_err();

    assert!(matches!(err, AppError::DuplicateKey(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_usernames_with_slashes_are_supported() {
    require_emulator!();

    let db = test_db().await;
    let username = unique_username("a/b");

    let user = db.create_user(&username).await.unwrap();
    assert_eq!(db.find_user(user.id).await.unwrap().username, username);
}

#[tokio::test]
async fn test_append_entries_keeps_order() {
    require_emulator!();

    let db = test_db().await;
    let user = db.create_user(&unique_username("append")).await.unwrap();

    // Appended out of date order on purpose.
    for (description, day) in [("third", 3), ("first", 1), ("second", 2)] {
        db.append_entry(user.id, entry_on(description, day))
            .await
            .unwrap();
    }

    let fetched = db.find_user(user.id).await.unwrap();
    let descriptions: Vec<&str> = fetched
        .exercises
        .iter()
        .map(|e| e.description.as_str())
        .collect();
    assert_eq!(descriptions, ["third", "first", "second"]);
    assert_eq!(fetched.exercises[1].date, "Mon Jan 01 2024");
}

#[tokio::test]
async fn test_append_to_missing_user_fails() {
    require_emulator!();

    let db = test_db().await;
    let err = db
        .append_entry(ObjectId::generate(), entry_on("ghost", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_list_users_includes_new_user() {
    require_emulator!();

    let db = test_db().await;
    let user = db.create_user(&unique_username("list")).await.unwrap();

    let users = db.list_users().await.unwrap();
    assert!(users.iter().any(|u| u.id == user.id));
}
