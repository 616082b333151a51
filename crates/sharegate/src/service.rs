//! The sharing service: the operations exposed to the HTTP/API layer.

use std::sync::Arc;

use sharegate_authz::{AccessGate, AuthzError, Result};
use sharegate_core::{Capabilities, CapabilityKind, File, FileId, Grant, User, UserId};
use sharegate_notify::{ChangeNotifier, SubscriberId, Subscription};
use sharegate_store::{FileRepository, GrantRepository, UserRepository};

/// Configuration for the sharing service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Per-subscriber event channel capacity.
    pub event_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            event_capacity: sharegate_notify::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// The main service struct.
///
/// Combines the access gate, the repositories, and the change notifier
/// into the operations callers consume:
///
/// - Authorization queries (`authorize_read`, `filter_readable`,
///   `authorize_grant_management`)
/// - Grant lifecycle (`mutate_grant`, `revoke_grant`, `list_grants`)
/// - Change subscription (`subscribe`, `unsubscribe`)
///
/// Every mutation notifies subscribers only after the repository reports a
/// committed write, and notification can neither delay nor fail the
/// mutation.
pub struct SharingService<S> {
    store: Arc<S>,
    gate: AccessGate<S>,
    notifier: ChangeNotifier,
}

impl<S> SharingService<S>
where
    S: FileRepository + UserRepository + GrantRepository,
{
    /// Create a new service over the given store.
    pub fn new(store: Arc<S>, config: ServiceConfig) -> Self {
        Self {
            gate: AccessGate::new(Arc::clone(&store)),
            notifier: ChangeNotifier::with_capacity(config.event_capacity),
            store,
        }
    }

    /// The store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The notifier, for callers that wire it elsewhere (e.g. a socket
    /// layer that owns subscriptions directly).
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    // ─────────────────────────────────────────────────────────────────────
    // Authorization Queries
    // ─────────────────────────────────────────────────────────────────────

    /// Check whether `user` may read the file.
    ///
    /// A denial is `Ok(false)`; a missing file stays an error, so callers
    /// can tell the two apart.
    pub async fn authorize_read(&self, user: &User, file_id: FileId) -> Result<bool> {
        match self.gate.authorize(user, file_id, CapabilityKind::Read).await {
            Ok(()) => Ok(true),
            Err(AuthzError::AccessDenied { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Keep only the files `user` may read, preserving input order.
    pub async fn filter_readable(&self, user: &User, files: Vec<File>) -> Result<Vec<File>> {
        self.gate.filter_readable(user, files).await
    }

    /// Check whether `user` may manage grants on the file.
    pub async fn authorize_grant_management(&self, user: &User, file_id: FileId) -> Result<bool> {
        match self.gate.authorize_grant_management(user, file_id, None).await {
            Ok(()) => Ok(true),
            Err(AuthzError::AccessDenied { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Grant Lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Create or replace `target_user_id`'s grant on the file.
    ///
    /// The whole capability tuple is supplied on every call; there is no
    /// partial patch. The actor needs grant-management rights, the target
    /// must exist, and a grant must carry at least one capability.
    /// Granting to the file's owner is rejected: owner capabilities are
    /// implied, never stored.
    pub async fn mutate_grant(
        &self,
        actor: &User,
        file_id: FileId,
        target_user_id: UserId,
        capabilities: Capabilities,
    ) -> Result<Grant> {
        self.gate
            .authorize_grant_management(actor, file_id, Some(target_user_id))
            .await?;

        if capabilities.is_empty() {
            return Err(AuthzError::Validation(
                "a grant must carry at least one capability".into(),
            ));
        }

        self.store
            .get_user(target_user_id)
            .await
            .map_err(AuthzError::from)?
            .ok_or_else(|| AuthzError::user_not_found(target_user_id))?;

        let file = self
            .store
            .get_file(file_id)
            .await
            .map_err(AuthzError::from)?
            .ok_or_else(|| AuthzError::file_not_found(file_id))?;
        if file.is_owned_by(target_user_id) {
            return Err(AuthzError::Validation(format!(
                "user {} owns file {} and already holds all capabilities",
                target_user_id, file_id
            )));
        }

        let grant = self
            .store
            .upsert_grant(file_id, target_user_id, capabilities)
            .await
            .map_err(AuthzError::from)?;

        tracing::info!(
            actor = %actor.id,
            target = %target_user_id,
            file = %file_id,
            caps = %capabilities,
            "grant stored"
        );

        // Fan-out strictly after the committed write; it cannot fail the
        // mutation.
        self.notifier.notify(file_id);

        Ok(grant)
    }

    /// Revoke `target_user_id`'s grant on the file.
    ///
    /// Revoking an absent grant succeeds without an event - nothing was
    /// committed, so nothing is broadcast.
    pub async fn revoke_grant(
        &self,
        actor: &User,
        file_id: FileId,
        target_user_id: UserId,
    ) -> Result<()> {
        self.gate
            .authorize_grant_management(actor, file_id, Some(target_user_id))
            .await?;

        let removed = self
            .store
            .delete_grant(file_id, target_user_id)
            .await
            .map_err(AuthzError::from)?;

        if removed {
            tracing::info!(
                actor = %actor.id,
                target = %target_user_id,
                file = %file_id,
                "grant revoked"
            );
            self.notifier.notify(file_id);
        } else {
            tracing::debug!(
                actor = %actor.id,
                target = %target_user_id,
                file = %file_id,
                "revoke of absent grant, no-op"
            );
        }

        Ok(())
    }

    /// List all grants on the file, for callers rendering a sharing view.
    ///
    /// Requires grant-management rights. Unordered.
    pub async fn list_grants(&self, actor: &User, file_id: FileId) -> Result<Vec<Grant>> {
        self.gate
            .authorize_grant_management(actor, file_id, None)
            .await?;

        self.store
            .list_grants(file_id)
            .await
            .map_err(AuthzError::from)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Change Subscription
    // ─────────────────────────────────────────────────────────────────────

    /// Register a subscriber channel for permission-update events.
    pub fn subscribe(&self) -> Subscription {
        self.notifier.subscribe()
    }

    /// Remove a subscriber channel. Idempotent.
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.notifier.unsubscribe(id)
    }
}
