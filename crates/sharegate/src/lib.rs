//! # Sharegate
//!
//! The unified API for the sharegate core - who may read, write, or
//! re-share an uploaded file, and how connected clients learn that the
//! answer changed.
//!
//! ## Overview
//!
//! Sharegate decides authorization consistently across every file-scoped
//! operation and broadcasts sharing-state changes without ever stalling
//! the authoritative write path:
//!
//! - **Capabilities**: a read/write/share tuple resolved per (user, file)
//! - **Grants**: the stored capability record, one per (file, user) pair
//! - **Access gate**: the single enforcement point for file operations
//! - **Change notification**: best-effort fan-out after committed
//!   mutations
//!
//! ## Key Rules
//!
//! - Admins bypass all grant checks everywhere.
//! - A file's owner bypasses all grant checks on that file.
//! - Re-sharing requires the share capability; sharing with yourself is
//!   always denied.
//! - Notification is decoupled from mutation: a slow subscriber loses
//!   events, never delays a write.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sharegate::{Capabilities, FileId, ServiceConfig, SharingService, UserId};
//! use sharegate::store::SqliteStore;
//!
//! async fn example() {
//!     let store = Arc::new(SqliteStore::open("sharegate.db").unwrap());
//!     let service = SharingService::new(store, ServiceConfig::default());
//!
//!     // A client subscribes to sharing-state changes
//!     let mut sub = service.subscribe();
//!
//!     // The owner (loaded by the session layer) shares a file
//!     // let grant = service
//!     //     .mutate_grant(&owner, FileId::new(1), UserId::new(2), Capabilities::read_only())
//!     //     .await
//!     //     .unwrap();
//!
//!     // The subscriber sees {"type":"permission_update","fileId":1}
//!     // let event = sub.events.recv().await.unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - [`core`](sharegate_core) - entity and capability types
//! - [`store`](sharegate_store) - repository traits, SQLite and memory backends
//! - [`authz`](sharegate_authz) - the pure engine and the access gate
//! - [`notify`](sharegate_notify) - the change notifier and wire event

pub use sharegate_authz as authz;
pub use sharegate_core as core;
pub use sharegate_notify as notify;
pub use sharegate_store as store;

pub mod service;

pub use sharegate_authz::{AccessGate, AuthzError};
pub use sharegate_core::{Capabilities, CapabilityKind, File, FileId, Grant, User, UserId};
pub use sharegate_notify::{ChangeEvent, ChangeNotifier, SubscriberId, Subscription};
pub use service::{ServiceConfig, SharingService};
