//! In-memory implementation of the repository traits.
//!
//! This is primarily for testing. It has the same semantics as SQLite,
//! including cascade deletion, but keeps everything in memory with no
//! persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use sharegate_core::{Capabilities, File, FileId, Grant, User, UserId};

use crate::error::{Result, StoreError};
use crate::traits::{FileRepository, GrantRepository, UserRepository};

/// In-memory store implementing all three repository traits.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    users: HashMap<UserId, User>,
    files: HashMap<FileId, File>,
    /// Grants keyed by pair: the map key is the uniqueness invariant.
    grants: HashMap<(FileId, UserId), Grant>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner::default()),
        }
    }

    /// Insert or replace a user row.
    pub fn put_user(&self, user: User) {
        self.inner.write().unwrap().users.insert(user.id, user);
    }

    /// Insert or replace a file row.
    pub fn put_file(&self, file: File) {
        self.inner.write().unwrap().files.insert(file.id, file);
    }

    /// Delete a user row, cascading their grants.
    pub fn delete_user(&self, id: UserId) {
        let mut inner = self.inner.write().unwrap();
        inner.users.remove(&id);
        inner.grants.retain(|(_, user_id), _| *user_id != id);
    }

    /// Delete a file row, cascading its grants.
    pub fn delete_file(&self, id: FileId) {
        let mut inner = self.inner.write().unwrap();
        inner.files.remove(&id);
        inner.grants.retain(|(file_id, _), _| *file_id != id);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.users.get(&id).cloned())
    }
}

#[async_trait]
impl FileRepository for MemoryStore {
    async fn get_file(&self, id: FileId) -> Result<Option<File>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.files.get(&id).cloned())
    }
}

#[async_trait]
impl GrantRepository for MemoryStore {
    async fn get_grant(&self, file_id: FileId, user_id: UserId) -> Result<Option<Grant>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.grants.get(&(file_id, user_id)).cloned())
    }

    async fn list_grants(&self, file_id: FileId) -> Result<Vec<Grant>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .grants
            .values()
            .filter(|g| g.file_id == file_id)
            .cloned()
            .collect())
    }

    async fn upsert_grant(
        &self,
        file_id: FileId,
        user_id: UserId,
        capabilities: Capabilities,
    ) -> Result<Grant> {
        let mut inner = self.inner.write().unwrap();

        // Same referential checks the SQLite foreign keys perform.
        if !inner.files.contains_key(&file_id) || !inner.users.contains_key(&user_id) {
            return Err(StoreError::NotFound(format!(
                "file {} or user {} no longer exists",
                file_id, user_id
            )));
        }

        let now = now_millis();
        let grant = inner
            .grants
            .entry((file_id, user_id))
            .and_modify(|g| g.replace_capabilities(capabilities, now))
            .or_insert_with(|| Grant::new(file_id, user_id, capabilities, now));

        Ok(grant.clone())
    }

    async fn delete_grant(&self, file_id: FileId, user_id: UserId) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();
        Ok(inner.grants.remove(&(file_id, user_id)).is_some())
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
