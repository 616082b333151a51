//! Repository traits: the abstract interfaces the authorization core
//! depends on.
//!
//! Users and files are owned by external collaborators (account system,
//! upload pipeline); the core only ever reads them. Grants are the core's
//! own data and get full CRUD. Splitting the three concerns into separate
//! traits lets a backend implement exactly what a test needs.

use async_trait::async_trait;
use sharegate_core::{Capabilities, File, FileId, Grant, User, UserId};

use crate::error::Result;

/// Read-only lookup of user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by id, including the admin flag.
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;
}

/// Read-only lookup of file records.
#[async_trait]
pub trait FileRepository: Send + Sync {
    /// Get a file by id.
    async fn get_file(&self, id: FileId) -> Result<Option<File>>;
}

/// Durable CRUD over permission grants.
///
/// # Contracts
///
/// - **One grant per pair**: at most one row exists per (file, user);
///   `upsert_grant` replaces atomically, never duplicates.
/// - **Unordered listing**: `list_grants` makes no ordering promise.
/// - **Idempotent delete**: deleting an absent grant is a no-op.
/// - **Durability**: a successful return is a committed write; callers may
///   fan out notifications on the strength of it.
#[async_trait]
pub trait GrantRepository: Send + Sync {
    /// Get the grant for a (file, user) pair, if any.
    async fn get_grant(&self, file_id: FileId, user_id: UserId) -> Result<Option<Grant>>;

    /// List all grants on a file. Unordered; callers must not assume a
    /// stable ordering.
    async fn list_grants(&self, file_id: FileId) -> Result<Vec<Grant>>;

    /// Atomic create-or-replace of the grant for a (file, user) pair.
    ///
    /// On replace, `granted_at` is preserved and `updated_at` advances.
    /// Returns the stored row.
    async fn upsert_grant(
        &self,
        file_id: FileId,
        user_id: UserId,
        capabilities: Capabilities,
    ) -> Result<Grant>;

    /// Delete the grant for a (file, user) pair.
    ///
    /// Returns `true` if a row existed. Absent rows are a no-op, so
    /// revocation can be retried freely.
    async fn delete_grant(&self, file_id: FileId, user_id: UserId) -> Result<bool>;
}
