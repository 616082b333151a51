//! SQLite implementation of the repository traits.
//!
//! This is the primary storage backend for sharegate. It uses rusqlite
//! with bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use sharegate_core::{Capabilities, File, FileId, Grant, User, UserId};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{FileRepository, GrantRepository, UserRepository};

/// SQLite-based store implementing all three repository traits.
///
/// Thread-safe via an internal mutex. All operations run on the blocking
/// pool to avoid stalling the async runtime on database I/O.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure against the connection on the blocking pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|e| poisoned_lock(&e))?;
            f(&conn)
        })
        .await
        .map_err(join_failed)?
    }

    // ─────────────────────────────────────────────────────────────────────
    // Entity administration
    //
    // Users and files belong to external collaborators (account system,
    // upload pipeline). These inherent methods exist for them and for
    // tests; the authorization core consumes only the read traits.
    // ─────────────────────────────────────────────────────────────────────

    /// Insert or replace a user row.
    pub async fn put_user(&self, user: &User) -> Result<()> {
        let user = user.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO users (user_id, name, is_admin) VALUES (?1, ?2, ?3)",
                params![user.id.as_i64(), user.name, user.is_admin as i64],
            )?;
            Ok(())
        })
        .await
    }

    /// Insert or replace a file row.
    pub async fn put_file(&self, file: &File) -> Result<()> {
        let file = file.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO files (file_id, owner_id, name, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    file.id.as_i64(),
                    file.owner_id.as_i64(),
                    file.name,
                    file.created_at
                ],
            )?;
            Ok(())
        })
        .await
    }

    /// Delete a user row. Grants held by the user cascade away.
    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM users WHERE user_id = ?1", params![id.as_i64()])?;
            Ok(())
        })
        .await
    }

    /// Delete a file row. Grants on the file cascade away.
    pub async fn delete_file(&self, id: FileId) -> Result<()> {
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM files WHERE file_id = ?1", params![id.as_i64()])?;
            Ok(())
        })
        .await
    }
}

/// Map a poisoned mutex into a database error.
fn poisoned_lock<T>(e: &std::sync::PoisonError<T>) -> StoreError {
    StoreError::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
        Some(format!("mutex poisoned: {}", e)),
    ))
}

/// Map a failed blocking-task join into a database error.
fn join_failed(e: tokio::task::JoinError) -> StoreError {
    StoreError::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
        Some(format!("spawn_blocking failed: {}", e)),
    ))
}

/// Classify a constraint failure from a grant write.
///
/// Foreign-key failures mean the referenced file or user row is gone;
/// uniqueness failures mean the one-grant-per-pair invariant pushed back.
fn grant_write_error(e: rusqlite::Error, file_id: FileId, user_id: UserId) -> StoreError {
    if let rusqlite::Error::SqliteFailure(inner, _) = &e {
        match inner.extended_code {
            rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                return StoreError::NotFound(format!(
                    "file {} or user {} no longer exists",
                    file_id, user_id
                ));
            }
            rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
            | rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => {
                return StoreError::Conflict {
                    file_id: file_id.as_i64(),
                    user_id: user_id.as_i64(),
                };
            }
            _ => {}
        }
    }
    StoreError::Database(e)
}

// Row mapping helpers

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: UserId::new(row.get("user_id")?),
        name: row.get("name")?,
        is_admin: row.get::<_, i64>("is_admin")? != 0,
    })
}

fn row_to_file(row: &rusqlite::Row<'_>) -> rusqlite::Result<File> {
    Ok(File {
        id: FileId::new(row.get("file_id")?),
        owner_id: UserId::new(row.get("owner_id")?),
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}

fn row_to_grant(row: &rusqlite::Row<'_>) -> rusqlite::Result<Grant> {
    Ok(Grant {
        file_id: FileId::new(row.get("file_id")?),
        user_id: UserId::new(row.get("user_id")?),
        capabilities: Capabilities {
            can_read: row.get::<_, i64>("can_read")? != 0,
            can_write: row.get::<_, i64>("can_write")? != 0,
            can_share: row.get::<_, i64>("can_share")? != 0,
        },
        granted_at: row.get("granted_at")?,
        updated_at: row.get("updated_at")?,
    })
}

#[async_trait]
impl UserRepository for SqliteStore {
    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT user_id, name, is_admin FROM users WHERE user_id = ?1",
                params![id.as_i64()],
                row_to_user,
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
    }
}

#[async_trait]
impl FileRepository for SqliteStore {
    async fn get_file(&self, id: FileId) -> Result<Option<File>> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT file_id, owner_id, name, created_at FROM files WHERE file_id = ?1",
                params![id.as_i64()],
                row_to_file,
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
    }
}

#[async_trait]
impl GrantRepository for SqliteStore {
    async fn get_grant(&self, file_id: FileId, user_id: UserId) -> Result<Option<Grant>> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT file_id, user_id, can_read, can_write, can_share, granted_at, updated_at
                 FROM grants WHERE file_id = ?1 AND user_id = ?2",
                params![file_id.as_i64(), user_id.as_i64()],
                row_to_grant,
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
    }

    async fn list_grants(&self, file_id: FileId) -> Result<Vec<Grant>> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT file_id, user_id, can_read, can_write, can_share, granted_at, updated_at
                 FROM grants WHERE file_id = ?1",
            )?;

            let grants = stmt
                .query_map(params![file_id.as_i64()], row_to_grant)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(grants)
        })
        .await
    }

    async fn upsert_grant(
        &self,
        file_id: FileId,
        user_id: UserId,
        capabilities: Capabilities,
    ) -> Result<Grant> {
        self.with_conn(move |conn| {
            let now = now_millis();

            // Single-statement create-or-replace: the composite primary key
            // plus ON CONFLICT keeps the pair unique under concurrency.
            conn.execute(
                "INSERT INTO grants (
                    file_id, user_id, can_read, can_write, can_share, granted_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
                ON CONFLICT(file_id, user_id) DO UPDATE SET
                    can_read = excluded.can_read,
                    can_write = excluded.can_write,
                    can_share = excluded.can_share,
                    updated_at = excluded.updated_at",
                params![
                    file_id.as_i64(),
                    user_id.as_i64(),
                    capabilities.can_read as i64,
                    capabilities.can_write as i64,
                    capabilities.can_share as i64,
                    now,
                ],
            )
            .map_err(|e| grant_write_error(e, file_id, user_id))?;

            conn.query_row(
                "SELECT file_id, user_id, can_read, can_write, can_share, granted_at, updated_at
                 FROM grants WHERE file_id = ?1 AND user_id = ?2",
                params![file_id.as_i64(), user_id.as_i64()],
                row_to_grant,
            )
            .map_err(StoreError::from)
        })
        .await
    }

    async fn delete_grant(&self, file_id: FileId, user_id: UserId) -> Result<bool> {
        self.with_conn(move |conn| {
            let deleted = conn.execute(
                "DELETE FROM grants WHERE file_id = ?1 AND user_id = ?2",
                params![file_id.as_i64(), user_id.as_i64()],
            )?;
            Ok(deleted > 0)
        })
        .await
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
