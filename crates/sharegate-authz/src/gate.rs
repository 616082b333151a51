//! The access gate: the enforcement point for file-scoped operations.

use std::sync::Arc;

use sharegate_core::{CapabilityKind, File, FileId, User, UserId};
use sharegate_store::{FileRepository, GrantRepository};

use crate::engine;
use crate::error::{AuthzError, Result};

/// Applies capability checks uniformly to every file-scoped operation.
///
/// The gate is stateless apart from its store handle; each call is an
/// independent, short-lived load-and-check.
pub struct AccessGate<S> {
    store: Arc<S>,
}

impl<S> Clone for AccessGate<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> AccessGate<S>
where
    S: FileRepository + GrantRepository,
{
    /// Create a gate over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Check that `user` holds `needed` on the file.
    ///
    /// Returns `NotFound` if the file does not exist - deliberately
    /// distinct from `AccessDenied`, which means the file exists but the
    /// capability check failed.
    pub async fn authorize(
        &self,
        user: &User,
        file_id: FileId,
        needed: CapabilityKind,
    ) -> Result<()> {
        let file = self
            .store
            .get_file(file_id)
            .await?
            .ok_or_else(|| AuthzError::file_not_found(file_id))?;

        let grant = self.store.get_grant(file_id, user.id).await?;
        let caps = engine::effective_capabilities(user, &file, grant.as_ref());

        if caps.allows(needed) {
            Ok(())
        } else {
            Err(AuthzError::denied(user.id, file_id, needed))
        }
    }

    /// Keep only the files `user` can read, preserving input order.
    ///
    /// Filter-not-reject: inaccessible files are silently omitted, never
    /// surfaced as an error. Running the filter on its own output returns
    /// it unchanged.
    pub async fn filter_readable(&self, user: &User, files: Vec<File>) -> Result<Vec<File>> {
        let mut readable = Vec::with_capacity(files.len());

        for file in files {
            // Owners and admins need no grant lookup.
            let grant = if user.is_admin || file.is_owned_by(user.id) {
                None
            } else {
                self.store.get_grant(file.id, user.id).await?
            };

            if engine::effective_capabilities(user, &file, grant.as_ref()).can_read {
                readable.push(file);
            }
        }

        Ok(readable)
    }

    /// Check that `user` may manage grants on the file.
    ///
    /// When `acting_on` names the target of the management operation, a
    /// self-targeted call is rejected as a denial: granting yourself
    /// access is meaningless under owner/admin override.
    pub async fn authorize_grant_management(
        &self,
        user: &User,
        file_id: FileId,
        acting_on: Option<UserId>,
    ) -> Result<()> {
        let file = self
            .store
            .get_file(file_id)
            .await?
            .ok_or_else(|| AuthzError::file_not_found(file_id))?;

        if acting_on == Some(user.id) {
            return Err(AuthzError::denied(user.id, file_id, CapabilityKind::Share));
        }

        let grant = self.store.get_grant(file_id, user.id).await?;
        if engine::can_manage_grants(user, &file, grant.as_ref()) {
            Ok(())
        } else {
            Err(AuthzError::denied(user.id, file_id, CapabilityKind::Share))
        }
    }
}
