//! Database layer: a `Store` handle over the in-memory or Firestore backend.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::DatabaseConfig;
use crate::error::AppError;
use crate::models::{Entry, ObjectId, User, UserSummary};
use chrono::{DateTime, Utc};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Username claims (keyed by URL-encoded username)
    pub const USERNAMES: &str = "usernames";
    /// Exercise entries (keyed by entry id)
    pub const EXERCISES: &str = "exercises";
}

/// User store handle shared by all request handlers.
///
/// Cloning is cheap; clones talk to the same backend.
#[derive(Clone)]
pub enum Store {
    Memory(MemoryDb),
    Firestore(FirestoreDb),
}

impl Store {
    /// Open the configured backend.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        match config {
            DatabaseConfig::Memory => {
                tracing::info!("Using in-memory store");
                Ok(Store::Memory(MemoryDb::new()))
            }
            DatabaseConfig::Firestore { project_id } => {
                Ok(Store::Firestore(FirestoreDb::new(project_id).await?))
            }
        }
    }

    /// Register a user with an empty log.
    pub async fn create_user(&self, username: &str) -> Result<User, AppError> {
        match self {
            Store::Memory(db) => db.create_user(username),
            Store::Firestore(db) => db.create_user(username).await,
        }
    }

    pub async fn list_users(&self) -> Result<Vec<UserSummary>, AppError> {
        match self {
            Store::Memory(db) => Ok(db.list_users()),
            Store::Firestore(db) => db.list_users().await,
        }
    }

    /// Look up a user by the raw id from a request path.
    pub async fn find_user(&self, id: &str) -> Result<User, AppError> {
        let id: ObjectId = id.parse()?;
        match self {
            Store::Memory(db) => db.find_user(id),
            Store::Firestore(db) => db.find_user(id).await,
        }
    }

    /// Append an exercise to a user's log.
    ///
    /// A missing date defaults to today. Returns the updated user together
    /// with the entry that was appended.
    pub async fn append_entry(
        &self,
        id: &str,
        description: String,
        duration: i64,
        date: Option<DateTime<Utc>>,
    ) -> Result<(User, Entry), AppError> {
        let id: ObjectId = id.parse()?;
        let entry = Entry::new(description, duration, date);

        let user = match self {
            Store::Memory(db) => db.append_entry(id, entry.clone())?,
            Store::Firestore(db) => db.append_entry(id, entry.clone()).await?,
        };

        tracing::info!(user_id = %id, duration, date = %entry.date, "Exercise appended");
        Ok((user, entry))
    }

    /// Release the backend at shutdown.
    pub async fn close(&self) {
        match self {
            Store::Memory(db) => {
                tracing::info!(users = db.user_count(), "Discarding in-memory store");
            }
            Store::Firestore(_) => {
                tracing::info!("Closing Firestore connection");
            }
        }
    }
}
