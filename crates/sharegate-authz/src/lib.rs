//! # Sharegate Authz
//!
//! Capability resolution and enforcement for the sharegate core.
//!
//! ## Overview
//!
//! Authorization is split in two layers:
//!
//! - [`engine`] - pure, stateless capability resolution. Given a user, a
//!   file, and the user's stored grant (if any), it computes the effective
//!   read/write/share outcome. No I/O; exhaustively unit-testable.
//! - [`AccessGate`] - the enforcement point every file-scoped operation
//!   passes through. It loads the file and grant from the repositories,
//!   applies the engine, and rejects unauthorized calls.
//!
//! ## Resolution Rules
//!
//! - Admins hold all capabilities on every file.
//! - A file's owner holds all capabilities on that file.
//! - Anyone else holds exactly what their stored grant says, or nothing.
//! - Grant management (sharing with others) requires admin, ownership, or
//!   a grant with the share flag; sharing with yourself is always denied.
//!
//! ## Errors
//!
//! [`AuthzError`] is the public error taxonomy of the whole core. Raw
//! repository errors are translated into it at this boundary; callers
//! never observe storage-specific error shapes.

pub mod engine;
pub mod error;
pub mod gate;

pub use engine::{can_manage_grants, effective_capabilities};
pub use error::{AuthzError, Result};
pub use gate::AccessGate;
