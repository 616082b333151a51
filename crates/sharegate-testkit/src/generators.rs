//! Proptest generators for property-based testing.

use proptest::prelude::*;

use sharegate_core::{Capabilities, File, FileId, Grant, User, UserId};

/// Generate a user id.
pub fn user_id() -> impl Strategy<Value = UserId> {
    (1i64..10_000).prop_map(UserId::new)
}

/// Generate a file id.
pub fn file_id() -> impl Strategy<Value = FileId> {
    (1i64..10_000).prop_map(FileId::new)
}

/// Generate an arbitrary capability tuple (possibly empty).
pub fn capabilities() -> impl Strategy<Value = Capabilities> {
    (any::<bool>(), any::<bool>(), any::<bool>())
        .prop_map(|(r, w, s)| Capabilities::new(r, w, s))
}

/// Generate a capability tuple that grants at least one capability.
pub fn non_empty_capabilities() -> impl Strategy<Value = Capabilities> {
    capabilities().prop_filter("grant must carry a capability", |c| !c.is_empty())
}

/// Generate a display name.
pub fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{2,15}".prop_map(String::from)
}

/// Generate a reasonable timestamp (Unix ms).
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=i64::MAX / 2
}

/// Generate a user, admin or not.
pub fn user() -> impl Strategy<Value = User> {
    (user_id(), name(), any::<bool>()).prop_map(|(id, name, is_admin)| User {
        id,
        name,
        is_admin,
    })
}

/// Generate a file with an arbitrary owner.
pub fn file() -> impl Strategy<Value = File> {
    (file_id(), user_id(), name(), timestamp())
        .prop_map(|(id, owner_id, name, created_at)| File {
            id,
            owner_id,
            name,
            created_at,
        })
}

/// Generate a grant for the given (file, user) pair.
pub fn grant_for(file_id: FileId, user_id: UserId) -> impl Strategy<Value = Grant> {
    (capabilities(), timestamp())
        .prop_map(move |(caps, at)| Grant::new(file_id, user_id, caps, at))
}
