//! The stored grant record.

use serde::{Deserialize, Serialize};

use crate::capability::Capabilities;
use crate::types::{FileId, UserId};

/// One user's stored capabilities on one file.
///
/// At most one grant exists per (file_id, user_id) pair; the repository
/// enforces that with an atomic create-or-replace. Grants are never stored
/// for a file's owner - owner and admin capabilities are implied, not
/// recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub file_id: FileId,
    pub user_id: UserId,
    pub capabilities: Capabilities,
    /// When the grant was first created (Unix ms). Stable across updates.
    pub granted_at: i64,
    /// When the capability tuple last changed (Unix ms).
    pub updated_at: i64,
}

impl Grant {
    /// Create a grant record.
    pub fn new(file_id: FileId, user_id: UserId, capabilities: Capabilities, at: i64) -> Self {
        Self {
            file_id,
            user_id,
            capabilities,
            granted_at: at,
            updated_at: at,
        }
    }

    /// Replace the capability tuple, advancing `updated_at`.
    ///
    /// Whole-record replacement only; there is no per-flag patch.
    pub fn replace_capabilities(&mut self, capabilities: Capabilities, at: i64) {
        self.capabilities = capabilities;
        self.updated_at = at;
    }
}
