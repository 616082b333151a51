//! # Sharegate Core
//!
//! Entity and capability types for the sharegate authorization core.
//!
//! This crate contains no I/O, no storage, no networking. It is pure data:
//! the entities the rest of the workspace computes over.
//!
//! ## Key Types
//!
//! - [`User`] / [`UserId`] - an account, with an admin flag
//! - [`File`] / [`FileId`] - an uploaded file and its owner
//! - [`Grant`] - one user's stored capabilities on one file
//! - [`Capabilities`] - the read/write/share capability tuple
//! - [`CapabilityKind`] - the single capability an operation requires
//!
//! ## Capability Model
//!
//! Capabilities are resolved per (user, file) pair. Admins and file owners
//! hold all capabilities implicitly; everyone else holds exactly what a
//! stored [`Grant`] says, or nothing. At most one grant exists per
//! (file, user) pair - the storage layer enforces that invariant.

pub mod capability;
pub mod grant;
pub mod types;

pub use capability::{Capabilities, CapabilityKind};
pub use grant::Grant;
pub use types::{File, FileId, User, UserId};
