//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use sharegate::{ServiceConfig, SharingService};
use sharegate_core::{File, FileId, User, UserId};
use sharegate_store::MemoryStore;

/// A pre-seeded sharing world backed by a memory store.
///
/// `alice` owns `file`; `bob` and `carol` are regular members with no
/// grants; `root` is an admin. Tests grant and revoke from there.
pub struct SharingFixture {
    pub store: Arc<MemoryStore>,
    pub alice: User,
    pub bob: User,
    pub carol: User,
    pub root: User,
    pub file: File,
}

impl SharingFixture {
    /// Create the standard fixture world.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());

        let alice = User::new(UserId::new(1), "alice");
        let bob = User::new(UserId::new(2), "bob");
        let carol = User::new(UserId::new(3), "carol");
        let root = User::admin(UserId::new(9), "root");
        let file = File::new(FileId::new(100), alice.id, "quarterly-report.pdf", 1_000);

        store.put_user(alice.clone());
        store.put_user(bob.clone());
        store.put_user(carol.clone());
        store.put_user(root.clone());
        store.put_file(file.clone());

        Self {
            store,
            alice,
            bob,
            carol,
            root,
            file,
        }
    }

    /// Build a sharing service over the fixture store.
    pub fn service(&self) -> SharingService<MemoryStore> {
        SharingService::new(Arc::clone(&self.store), ServiceConfig::default())
    }

    /// Add another user to the world.
    pub fn add_user(&self, id: i64, name: &str) -> User {
        let user = User::new(UserId::new(id), name);
        self.store.put_user(user.clone());
        user
    }

    /// Add another file owned by `owner`.
    pub fn add_file(&self, id: i64, owner: &User, name: &str) -> File {
        let file = File::new(FileId::new(id), owner.id, name, 1_000);
        self.store.put_file(file.clone());
        file
    }
}

impl Default for SharingFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharegate_store::{FileRepository, UserRepository};

    #[tokio::test]
    async fn test_fixture_world_is_seeded() {
        let fixture = SharingFixture::new();

        let alice = fixture
            .store
            .get_user(fixture.alice.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!alice.is_admin);

        let root = fixture
            .store
            .get_user(fixture.root.id)
            .await
            .unwrap()
            .unwrap();
        assert!(root.is_admin);

        let file = fixture
            .store
            .get_file(fixture.file.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(file.owner_id, fixture.alice.id);
    }

    #[tokio::test]
    async fn test_fixture_extension_helpers() {
        let fixture = SharingFixture::new();

        let dave = fixture.add_user(4, "dave");
        let scratch = fixture.add_file(101, &dave, "scratch.txt");

        assert_eq!(scratch.owner_id, dave.id);
        assert!(fixture
            .store
            .get_file(scratch.id)
            .await
            .unwrap()
            .is_some());
    }
}
