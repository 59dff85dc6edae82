// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User registration and listing.

use crate::error::Result;
use crate::models::UserSummary;
use crate::routes::extract::JsonOrForm;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// User routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/users", get(list_users).post(create_user))
}

#[derive(Debug, Deserialize, Validate)]
struct CreateUserRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    username: String,
}

/// Register a new user.
async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonOrForm(body): JsonOrForm<CreateUserRequest>,
) -> Result<Json<UserSummary>> {
    body.validate()?;

    let user = state.store.create_user(&body.username).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "User created");

    Ok(Json(UserSummary::from(&user)))
}

/// List every user as `{username, _id}`.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserSummary>>> {
    let users = state.store.list_users().await?;
    tracing::debug!(count = users.len(), "Listed users");
    Ok(Json(users))
}
