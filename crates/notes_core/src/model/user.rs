//! User identity model.

use serde::{Deserialize, Serialize};

/// Row id of a user.
pub type UserId = i64;

/// Stored credential record.
///
/// `password_hash` is opaque here; hashing belongs to the credential hasher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Never serialized to callers.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Epoch milliseconds.
    pub created_at: i64,
}

/// Insert model for the identity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}
