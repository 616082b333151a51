//! Strong type definitions for sharegate entities.
//!
//! All identifiers are newtypes to prevent misuse at compile time. Both id
//! types serialize transparently as bare integers, which is what the change
//! event wire format carries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Create a new UserId from a raw integer.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw integer value.
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Identifier for an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub i64);

impl FileId {
    /// Create a new FileId from a raw integer.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw integer value.
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for FileId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A user account.
///
/// Authentication and session issuance live outside this core; a `User` is
/// whatever the session layer hands us, already verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Admins bypass all grant checks everywhere.
    pub is_admin: bool,
}

impl User {
    /// Create a regular (non-admin) user.
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_admin: false,
        }
    }

    /// Create an admin user.
    pub fn admin(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_admin: true,
        }
    }
}

/// An uploaded file.
///
/// Byte storage and transfer are external; the core only cares about
/// identity and ownership. The owner bypasses all grant checks on the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub id: FileId,
    pub owner_id: UserId,
    pub name: String,
    /// Upload time (Unix ms).
    pub created_at: i64,
}

impl File {
    /// Create a new file record.
    pub fn new(id: FileId, owner_id: UserId, name: impl Into<String>, created_at: i64) -> Self {
        Self {
            id,
            owner_id,
            name: name.into(),
            created_at,
        }
    }

    /// Check whether the given user owns this file.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_bare_integers() {
        let json = serde_json::to_string(&FileId::new(42)).unwrap();
        assert_eq!(json, "42");

        let back: FileId = serde_json::from_str("42").unwrap();
        assert_eq!(back, FileId::new(42));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(format!("{}", UserId::new(7)), "7");
        assert_eq!(format!("{}", FileId::new(13)), "13");
    }

    #[test]
    fn test_file_ownership() {
        let file = File::new(FileId::new(1), UserId::new(10), "report.pdf", 1_000);
        assert!(file.is_owned_by(UserId::new(10)));
        assert!(!file.is_owned_by(UserId::new(11)));
    }

    #[test]
    fn test_user_constructors() {
        let alice = User::new(UserId::new(1), "alice");
        let root = User::admin(UserId::new(2), "root");
        assert!(!alice.is_admin);
        assert!(root.is_admin);
    }
}
