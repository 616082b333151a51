//! The public error taxonomy of the authorization core.

use thiserror::Error;

use sharegate_core::{CapabilityKind, FileId, UserId};
use sharegate_store::StoreError;

/// Errors that cross the core boundary.
///
/// Gate and engine failures propagate to callers unmodified. Repository
/// errors are translated here; no storage-specific shape leaks through.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// A file, user, or grant the operation needs does not exist.
    ///
    /// Distinct from [`AuthzError::AccessDenied`]: a request against a
    /// nonexistent file is not a permission failure.
    #[error("not found: {0}")]
    NotFound(String),

    /// The capability check failed.
    #[error("user {user_id} lacks {needed} on file {file_id}")]
    AccessDenied {
        user_id: UserId,
        file_id: FileId,
        needed: CapabilityKind,
    },

    /// A mutation violated the one-grant-per-pair invariant at the store
    /// boundary.
    #[error("conflicting grant for file {file_id} user {user_id}")]
    Conflict { file_id: FileId, user_id: UserId },

    /// Malformed capability input, e.g. a grant that grants nothing.
    #[error("invalid capability input: {0}")]
    Validation(String),

    /// Infrastructure failure in the backing store. Message only - the
    /// storage error shape stays behind the repository boundary.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl AuthzError {
    /// A missing file.
    pub fn file_not_found(id: FileId) -> Self {
        Self::NotFound(format!("file {}", id))
    }

    /// A missing user.
    pub fn user_not_found(id: UserId) -> Self {
        Self::NotFound(format!("user {}", id))
    }

    /// A denial of `needed` for `user_id` on `file_id`.
    pub fn denied(user_id: UserId, file_id: FileId, needed: CapabilityKind) -> Self {
        Self::AccessDenied {
            user_id,
            file_id,
            needed,
        }
    }
}

impl From<StoreError> for AuthzError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(what) => AuthzError::NotFound(what),
            StoreError::Conflict { file_id, user_id } => AuthzError::Conflict {
                file_id: FileId::new(file_id),
                user_id: UserId::new(user_id),
            },
            StoreError::InvalidData(msg) => AuthzError::Validation(msg),
            other => AuthzError::Storage(other.to_string()),
        }
    }
}

/// Result type for authorization operations.
pub type Result<T> = std::result::Result<T, AuthzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_translate_without_leaking_shape() {
        let err: AuthzError = StoreError::Conflict {
            file_id: 1,
            user_id: 2,
        }
        .into();
        assert!(matches!(err, AuthzError::Conflict { .. }));

        let err: AuthzError = StoreError::NotFound("file 9".into()).into();
        assert!(matches!(err, AuthzError::NotFound(_)));

        let err: AuthzError = StoreError::Migration("bad version".into()).into();
        assert!(matches!(err, AuthzError::Storage(_)));
    }

    #[test]
    fn test_not_found_distinct_from_denied() {
        let not_found = AuthzError::file_not_found(FileId::new(1));
        let denied = AuthzError::denied(UserId::new(2), FileId::new(1), CapabilityKind::Read);

        assert!(matches!(not_found, AuthzError::NotFound(_)));
        assert!(matches!(denied, AuthzError::AccessDenied { .. }));
    }
}
