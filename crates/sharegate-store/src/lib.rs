//! # Sharegate Store
//!
//! Repository abstraction for the sharegate authorization core. Provides
//! trait-based interfaces over users, files, and permission grants with
//! SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! The authorization core consumes three narrow repository traits:
//! [`UserRepository`] and [`FileRepository`] are read-only lookups (users
//! and files are owned by external collaborators), while
//! [`GrantRepository`] is full CRUD over permission grants with an atomic
//! create-or-replace as its centerpiece.
//!
//! ## Key Types
//!
//! - [`GrantRepository`] / [`FileRepository`] / [`UserRepository`] - the
//!   async traits the core depends on
//! - [`SqliteStore`] - SQLite-based persistent storage (primary)
//! - [`MemoryStore`] - in-memory storage for tests
//!
//! ## Atomicity Contract
//!
//! `upsert_grant` must never leave two rows for the same (file, user)
//! pair, even under concurrent calls. The store owns that guarantee: the
//! SQLite backend uses a composite primary key plus
//! `INSERT .. ON CONFLICT DO UPDATE` in a single statement; the memory
//! backend performs a single keyed write under a lock. A successful return
//! from any mutation is a durable commit.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sharegate_store::{GrantRepository, SqliteStore};
//! use sharegate_core::{Capabilities, FileId, UserId};
//!
//! async fn example() {
//!     let store = SqliteStore::open("sharegate.db").unwrap();
//!
//!     let grant = store
//!         .upsert_grant(FileId::new(1), UserId::new(2), Capabilities::read_only())
//!         .await
//!         .unwrap();
//!     assert!(grant.capabilities.can_read);
//! }
//! ```

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{FileRepository, GrantRepository, UserRepository};
