// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process user store.
//!
//! Backed by sharded concurrent maps: a username claim and an entry append
//! each happen under a single shard lock, so concurrent requests never lose
//! an update.

use crate::error::AppError;
use crate::models::{Entry, ObjectId, User, UserSummary};
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Default)]
struct Inner {
    users: DashMap<ObjectId, User>,
    usernames: DashMap<String, ObjectId>,
}

/// In-memory database. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryDb {
    inner: Arc<Inner>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user; fails if the username is taken.
    pub fn create_user(&self, username: &str) -> Result<User, AppError> {
        match self.inner.usernames.entry(username.to_string()) {
            MapEntry::Occupied(_) => Err(AppError::DuplicateKey(format!(
                "username '{}' already exists",
                username
            ))),
            MapEntry::Vacant(slot) => {
                let user = User::new(username);
                self.inner.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }

    /// All users, oldest first.
    pub fn list_users(&self) -> Vec<UserSummary> {
        let mut users: Vec<UserSummary> = self
            .inner
            .users
            .iter()
            .map(|user| UserSummary::from(user.value()))
            .collect();
        users.sort_by_key(|user| user.id);
        users
    }

    pub fn find_user(&self, id: ObjectId) -> Result<User, AppError> {
        self.inner
            .users
            .get(&id)
            .map(|user| user.value().clone())
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Append an entry and return the updated user.
    pub fn append_entry(&self, id: ObjectId, entry: Entry) -> Result<User, AppError> {
        let mut user = self
            .inner
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        user.exercises.push(entry);
        Ok(user.value().clone())
    }

    pub fn user_count(&self) -> usize {
        self.inner.users.len()
    }
}
