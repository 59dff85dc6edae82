// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile storage)
//! - Usernames (uniqueness claims)
//! - Exercises (one document per appended entry)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Entry, ExerciseRecord, ObjectId, User, UserRecord, UserSummary, UsernameClaim};
use crate::time_utils::format_utc_rfc3339;
use firestore::errors::FirestoreError;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Register a new user.
    ///
    /// The username is claimed first with a create-only write, which fails
    /// atomically if another request already holds it.
    pub async fn create_user(&self, username: &str) -> Result<User, AppError> {
        let client = self.get_client()?;
        let user = User::new(username);
        let claim_id = urlencoding::encode(username).into_owned();

        let _: UsernameClaim = client
            .fluent()
            .insert()
            .into(collections::USERNAMES)
            .document_id(&claim_id)
            .object(&UsernameClaim { user_id: user.id })
            .execute()
            .await
            .map_err(|e| match e {
                FirestoreError::DataConflictError(_) => {
                    AppError::DuplicateKey(format!("username '{}' already exists", username))
                }
                other => AppError::Database(other.to_string()),
            })?;

        let record = UserRecord {
            id: user.id,
            username: user.username.clone(),
            created_at: format_utc_rfc3339(chrono::Utc::now()),
        };

        let written: Result<(), AppError> = client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(user.id.to_string())
            .object(&record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()));

        if let Err(err) = written {
            // Release the claim so the username is not stranded.
            if let Err(cleanup) = client
                .fluent()
                .delete()
                .from(collections::USERNAMES)
                .document_id(&claim_id)
                .execute()
                .await
            {
                tracing::warn!(username, error = %cleanup, "Failed to release username claim");
            }
            return Err(err);
        }

        tracing::debug!(user_id = %user.id, username, "User stored");
        Ok(user)
    }

    /// List all users ordered by id.
    pub async fn list_users(&self) -> Result<Vec<UserSummary>, AppError> {
        let records: Vec<UserRecord> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .order_by([("id", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(records
            .into_iter()
            .map(|record| UserSummary {
                username: record.username,
                id: record.id,
            })
            .collect())
    }

    async fn get_user_record(&self, id: ObjectId) -> Result<Option<UserRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(&id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user with all of their entries in append order.
    pub async fn find_user(&self, id: ObjectId) -> Result<User, AppError> {
        let record = self
            .get_user_record(id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        let user_id = id.to_string();
        let entries: Vec<ExerciseRecord> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::EXERCISES)
            .filter(move |q| q.for_all([q.field("user_id").eq(user_id.clone())]))
            .order_by([
                ("appended_at", firestore::FirestoreQueryDirection::Ascending),
                ("entry_id", firestore::FirestoreQueryDirection::Ascending),
            ])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(User {
            id: record.id,
            username: record.username,
            exercises: entries.into_iter().map(Entry::from).collect(),
        })
    }

    // ─── Exercise Operations ─────────────────────────────────────

    /// Append an entry to a user's log and return the updated user.
    ///
    /// The entry is written as its own document; the user document is
    /// never rewritten.
    pub async fn append_entry(&self, id: ObjectId, entry: Entry) -> Result<User, AppError> {
        if self.get_user_record(id).await?.is_none() {
            return Err(AppError::NotFound(id.to_string()));
        }

        let record = ExerciseRecord::new(id, &entry, format_utc_rfc3339(chrono::Utc::now()));

        let _: ExerciseRecord = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::EXERCISES)
            .document_id(record.entry_id.to_string())
            .object(&record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(user_id = %id, entry_id = %record.entry_id, "Exercise stored");

        self.find_user(id).await
    }
}
