//! Pure capability resolution.
//!
//! These functions have no side effects and touch no storage; the result
//! depends only on the inputs. The [`crate::AccessGate`] owns loading
//! those inputs from the repositories.

use sharegate_core::{Capabilities, File, Grant, User};

/// Resolve a user's effective capabilities on a file.
///
/// Admins and the file's owner hold everything; anyone else holds exactly
/// what their stored grant says, or nothing at all.
///
/// Caller contract: `grant`, when present, must be the stored grant for
/// this same (file, user) pair.
pub fn effective_capabilities(user: &User, file: &File, grant: Option<&Grant>) -> Capabilities {
    if user.is_admin || file.is_owned_by(user.id) {
        return Capabilities::all();
    }

    match grant {
        Some(grant) => grant.capabilities,
        None => Capabilities::none(),
    }
}

/// Check whether a user may create, update, or delete *other* users'
/// grants on a file.
///
/// True for admins, the owner, and holders of a grant with the share
/// flag. Self-targeted management is rejected earlier, at the gate.
pub fn can_manage_grants(user: &User, file: &File, grant: Option<&Grant>) -> bool {
    if user.is_admin || file.is_owned_by(user.id) {
        return true;
    }

    grant.is_some_and(|g| g.capabilities.can_share)
}
