//! The capability tuple and the capability kinds operations require.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single capability that a file-scoped operation can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    /// Download, preview, or list the file.
    Read,
    /// Replace or modify the file.
    Write,
    /// Grant, update, or revoke other users' access to the file.
    Share,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CapabilityKind::Read => "read",
            CapabilityKind::Write => "write",
            CapabilityKind::Share => "share",
        };
        write!(f, "{}", s)
    }
}

/// The resolved read/write/share capability tuple.
///
/// Mutations always carry the complete tuple: there is deliberately no
/// partial-patch form, so a concurrent update can never clobber a flag the
/// writer did not mean to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities {
    pub can_read: bool,
    pub can_write: bool,
    pub can_share: bool,
}

impl Capabilities {
    /// All three capabilities. What owners and admins resolve to.
    pub const fn all() -> Self {
        Self {
            can_read: true,
            can_write: true,
            can_share: true,
        }
    }

    /// No capabilities. What a user without a grant resolves to.
    pub const fn none() -> Self {
        Self {
            can_read: false,
            can_write: false,
            can_share: false,
        }
    }

    /// Read only. The default for a newly shared file.
    pub const fn read_only() -> Self {
        Self {
            can_read: true,
            can_write: false,
            can_share: false,
        }
    }

    /// Construct an explicit tuple.
    pub const fn new(can_read: bool, can_write: bool, can_share: bool) -> Self {
        Self {
            can_read,
            can_write,
            can_share,
        }
    }

    /// Check whether this tuple allows the given capability.
    pub const fn allows(&self, kind: CapabilityKind) -> bool {
        match kind {
            CapabilityKind::Read => self.can_read,
            CapabilityKind::Write => self.can_write,
            CapabilityKind::Share => self.can_share,
        }
    }

    /// A tuple that grants nothing. Storing one would be a malformed grant.
    pub const fn is_empty(&self) -> bool {
        !self.can_read && !self.can_write && !self.can_share
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::read_only()
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "r={} w={} s={}",
            self.can_read as u8, self.can_write as u8, self.can_share as u8
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_per_kind() {
        let caps = Capabilities::new(true, false, true);
        assert!(caps.allows(CapabilityKind::Read));
        assert!(!caps.allows(CapabilityKind::Write));
        assert!(caps.allows(CapabilityKind::Share));
    }

    #[test]
    fn test_all_and_none() {
        assert!(Capabilities::all().allows(CapabilityKind::Write));
        assert!(!Capabilities::none().allows(CapabilityKind::Read));
        assert!(Capabilities::none().is_empty());
        assert!(!Capabilities::read_only().is_empty());
    }

    #[test]
    fn test_default_is_read_only() {
        let caps = Capabilities::default();
        assert_eq!(caps, Capabilities::read_only());
        assert!(caps.can_read);
        assert!(!caps.can_write);
        assert!(!caps.can_share);
    }
}
