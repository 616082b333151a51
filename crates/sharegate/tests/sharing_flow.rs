//! End-to-end sharing scenarios against the service facade.

use std::sync::Arc;

use sharegate::{
    AuthzError, Capabilities, File, FileId, ServiceConfig, SharingService, User, UserId,
};
use sharegate::store::{GrantRepository, SqliteStore};
use sharegate_testkit::SharingFixture;

#[tokio::test]
async fn delegated_resharing_requires_share_flag() {
    let fixture = SharingFixture::new();
    let service = fixture.service();
    let (alice, bob, carol, file) = (
        &fixture.alice,
        &fixture.bob,
        &fixture.carol,
        &fixture.file,
    );

    // Alice shares read-only with Bob.
    service
        .mutate_grant(alice, file.id, bob.id, Capabilities::read_only())
        .await
        .unwrap();

    // Bob cannot pass access on.
    let err = service
        .mutate_grant(bob, file.id, carol.id, Capabilities::read_only())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::AccessDenied { .. }));

    // Alice upgrades Bob's grant with the share flag (whole tuple).
    service
        .mutate_grant(alice, file.id, bob.id, Capabilities::new(true, false, true))
        .await
        .unwrap();

    // Now Bob's re-share succeeds and carries exactly what he specified.
    let grant = service
        .mutate_grant(bob, file.id, carol.id, Capabilities::read_only())
        .await
        .unwrap();
    assert_eq!(grant.file_id, file.id);
    assert_eq!(grant.user_id, carol.id);
    assert!(grant.capabilities.can_read);
    assert!(!grant.capabilities.can_write);
    assert!(!grant.capabilities.can_share);
}

#[tokio::test]
async fn revocation_takes_effect_immediately() {
    let fixture = SharingFixture::new();
    let service = fixture.service();
    let (alice, bob, file) = (&fixture.alice, &fixture.bob, &fixture.file);

    service
        .mutate_grant(alice, file.id, bob.id, Capabilities::read_only())
        .await
        .unwrap();
    assert!(service.authorize_read(bob, file.id).await.unwrap());

    service.revoke_grant(alice, file.id, bob.id).await.unwrap();
    assert!(!service.authorize_read(bob, file.id).await.unwrap());
}

#[tokio::test]
async fn subscriber_sees_one_event_per_commit() {
    let fixture = SharingFixture::new();
    let service = fixture.service();
    let (alice, bob, file) = (&fixture.alice, &fixture.bob, &fixture.file);

    let mut live = service.subscribe();
    let gone = service.subscribe();
    service.unsubscribe(gone.id);

    service
        .mutate_grant(alice, file.id, bob.id, Capabilities::read_only())
        .await
        .unwrap();

    // Exactly one event for the live subscriber...
    let event = live.events.recv().await.unwrap();
    assert_eq!(
        serde_json::to_value(event).unwrap(),
        serde_json::json!({ "type": "permission_update", "fileId": file.id.as_i64() })
    );
    assert!(live.events.try_recv().is_err());

    // ...and nothing for the one that unsubscribed before the mutation.
    let mut gone = gone;
    assert!(gone.events.try_recv().is_err());
}

#[tokio::test]
async fn revoking_an_absent_grant_is_silent() {
    let fixture = SharingFixture::new();
    let service = fixture.service();

    let mut sub = service.subscribe();

    // Nothing stored for Bob; the revoke succeeds but commits nothing.
    service
        .revoke_grant(&fixture.alice, fixture.file.id, fixture.bob.id)
        .await
        .unwrap();

    assert!(sub.events.try_recv().is_err());
}

#[tokio::test]
async fn missing_file_is_not_found_not_denied() {
    let fixture = SharingFixture::new();
    let service = fixture.service();

    let err = service
        .authorize_read(&fixture.bob, FileId::new(404))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::NotFound(_)));
}

#[tokio::test]
async fn self_sharing_is_denied() {
    let fixture = SharingFixture::new();
    let service = fixture.service();

    let err = service
        .mutate_grant(
            &fixture.bob,
            fixture.file.id,
            fixture.bob.id,
            Capabilities::read_only(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::AccessDenied { .. }));
}

#[tokio::test]
async fn owner_target_and_empty_tuple_are_validation_errors() {
    let fixture = SharingFixture::new();
    let service = fixture.service();

    let err = service
        .mutate_grant(
            &fixture.root,
            fixture.file.id,
            fixture.alice.id,
            Capabilities::read_only(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::Validation(_)));

    let err = service
        .mutate_grant(
            &fixture.alice,
            fixture.file.id,
            fixture.bob.id,
            Capabilities::none(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::Validation(_)));
}

#[tokio::test]
async fn granting_to_a_missing_user_is_not_found() {
    let fixture = SharingFixture::new();
    let service = fixture.service();

    let err = service
        .mutate_grant(
            &fixture.alice,
            fixture.file.id,
            UserId::new(404),
            Capabilities::read_only(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::NotFound(_)));
}

#[tokio::test]
async fn admins_manage_any_file() {
    let fixture = SharingFixture::new();
    let service = fixture.service();

    assert!(service
        .authorize_grant_management(&fixture.root, fixture.file.id)
        .await
        .unwrap());
    assert!(!service
        .authorize_grant_management(&fixture.bob, fixture.file.id)
        .await
        .unwrap());

    let grant = service
        .mutate_grant(
            &fixture.root,
            fixture.file.id,
            fixture.bob.id,
            Capabilities::all(),
        )
        .await
        .unwrap();
    assert_eq!(grant.capabilities, Capabilities::all());
}

#[tokio::test]
async fn listing_filters_out_inaccessible_files() {
    let fixture = SharingFixture::new();
    let service = fixture.service();
    let (alice, bob) = (&fixture.alice, &fixture.bob);

    let own = fixture.add_file(101, bob, "bobs-notes.txt");
    let shared = fixture.add_file(102, alice, "handbook.pdf");
    let opaque = fixture.add_file(103, alice, "payroll.xlsx");
    service
        .mutate_grant(alice, shared.id, bob.id, Capabilities::read_only())
        .await
        .unwrap();

    let all = vec![fixture.file.clone(), own.clone(), shared.clone(), opaque];

    let visible = service.filter_readable(bob, all).await.unwrap();
    assert_eq!(
        visible.iter().map(|f| f.id).collect::<Vec<_>>(),
        vec![own.id, shared.id]
    );

    // Filtering the filtered list changes nothing.
    let again = service.filter_readable(bob, visible.clone()).await.unwrap();
    assert_eq!(again, visible);
}

#[tokio::test]
async fn grant_listing_requires_management_rights() {
    let fixture = SharingFixture::new();
    let service = fixture.service();

    service
        .mutate_grant(
            &fixture.alice,
            fixture.file.id,
            fixture.bob.id,
            Capabilities::read_only(),
        )
        .await
        .unwrap();

    let grants = service
        .list_grants(&fixture.alice, fixture.file.id)
        .await
        .unwrap();
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].user_id, fixture.bob.id);

    let err = service
        .list_grants(&fixture.carol, fixture.file.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::AccessDenied { .. }));
}

#[tokio::test]
async fn concurrent_mutations_converge_to_one_grant() {
    let fixture = SharingFixture::new();
    let service = Arc::new(fixture.service());
    let file_id = fixture.file.id;
    let bob_id = fixture.bob.id;

    let mut handles = Vec::new();
    for i in 0..8u8 {
        let service = Arc::clone(&service);
        let alice = fixture.alice.clone();
        handles.push(tokio::spawn(async move {
            let caps = Capabilities::new(true, i % 2 == 0, i % 3 == 0);
            service.mutate_grant(&alice, file_id, bob_id, caps).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let grants = service.store().list_grants(file_id).await.unwrap();
    assert_eq!(grants.len(), 1);
}

/// The same core flow against the SQLite backend.
#[tokio::test]
async fn sqlite_backend_parity() {
    let store = Arc::new(SqliteStore::open_memory().unwrap());

    let alice = User::new(UserId::new(1), "alice");
    let bob = User::new(UserId::new(2), "bob");
    store.put_user(&alice).await.unwrap();
    store.put_user(&bob).await.unwrap();

    let file = File::new(FileId::new(1), alice.id, "report.pdf", 1_000);
    store.put_file(&file).await.unwrap();

    let service = SharingService::new(store, ServiceConfig::default());
    let mut sub = service.subscribe();

    service
        .mutate_grant(&alice, file.id, bob.id, Capabilities::read_only())
        .await
        .unwrap();
    assert!(service.authorize_read(&bob, file.id).await.unwrap());
    assert_eq!(sub.events.recv().await.unwrap().file_id(), file.id);

    service.revoke_grant(&alice, file.id, bob.id).await.unwrap();
    assert!(!service.authorize_read(&bob, file.id).await.unwrap());
    assert_eq!(sub.events.recv().await.unwrap().file_id(), file.id);
}
