//! User model for storage and API.

use crate::models::{Entry, ObjectId};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A registered user with their exercise entries in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: ObjectId,
    pub username: String,
    pub exercises: Vec<Entry>,
}

impl User {
    /// A freshly registered user with an empty log.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: ObjectId::generate(),
            username: username.into(),
            exercises: Vec::new(),
        }
    }
}

/// `{username, _id}` view of a user, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct UserSummary {
    pub username: String,
    #[serde(rename = "_id")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub id: ObjectId,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            id: user.id,
        }
    }
}

/// User profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// User ID (also used as document ID)
    pub id: ObjectId,
    pub username: String,
    /// When the user registered (RFC3339)
    pub created_at: String,
}

/// Username reservation stored in Firestore, keyed by the encoded username.
/// Created with a create-only write, so a second claim fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsernameClaim {
    pub user_id: ObjectId,
}
