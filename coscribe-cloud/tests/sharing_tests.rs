mod support;

use async_trait::async_trait;
use coscribe_cloud::error::{CloudError, CloudResult};
use coscribe_cloud::identity::{EmailEntry, IdentityProvider, ProfileResolver, UserRecord};
use coscribe_cloud::sharing::ShareManager;
use coscribe_types::{Capability, EmailAddress, NotificationKind, UserRole};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use support::{MemoryRoomProvider, RecordingViewCache, email, make_profile, make_room};
use tracing_subscriber::EnvFilter;

fn setup(
    rooms: Vec<coscribe_types::Room>,
) -> (Arc<MemoryRoomProvider>, Arc<RecordingViewCache>, ShareManager) {
    let provider = Arc::new(MemoryRoomProvider::with_rooms(rooms));
    let views = Arc::new(RecordingViewCache::default());
    let manager = ShareManager::with_view_cache(provider.clone(), views.clone());
    (provider, views, manager)
}

// ── Identity fake ──

struct MemoryIdentityProvider {
    records: Vec<UserRecord>,
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn users_by_email(&self, emails: &[EmailAddress]) -> CloudResult<Vec<UserRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|record| {
                record
                    .email_addresses
                    .iter()
                    .any(|entry| emails.contains(&entry.email_address))
            })
            .cloned()
            .collect())
    }
}

fn record(id: &str, first: &str, last: &str, address: &str) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        email_addresses: vec![EmailEntry { email_address: email(address) }],
        image_url: Some(format!("https://img.example.com/{id}.png")),
    }
}

fn resolver_with(records: Vec<UserRecord>) -> ProfileResolver {
    ProfileResolver::new(Arc::new(MemoryIdentityProvider { records }))
}

// ── Grants ──

#[tokio::test]
async fn grant_editor_maps_to_write_capability() {
    let room = make_room("doc-1", "user_1", "alice@example.com");
    let (provider, _, manager) = setup(vec![room.clone()]);
    let actor = make_profile("user_1", "Alice Li", "alice@example.com");

    manager
        .grant_access(&room.id, "bob@example.com", UserRole::Editor, &actor)
        .await
        .unwrap();

    let stored = provider.stored(&room.id).unwrap();
    let caps = stored.users_accesses.capabilities_of(&email("bob@example.com")).unwrap();
    assert!(caps.can_write());
    assert!(!caps.contains(Capability::PresenceWrite));
}

#[tokio::test]
async fn grant_viewer_maps_to_read_and_presence() {
    let room = make_room("doc-1", "user_1", "alice@example.com");
    let (provider, _, manager) = setup(vec![room.clone()]);
    let actor = make_profile("user_1", "Alice Li", "alice@example.com");

    manager
        .grant_access(&room.id, "carol@example.com", UserRole::Viewer, &actor)
        .await
        .unwrap();

    let stored = provider.stored(&room.id).unwrap();
    let caps = stored.users_accesses.capabilities_of(&email("carol@example.com")).unwrap();
    assert!(!caps.can_write());
    assert!(caps.can_read());
    assert!(caps.contains(Capability::PresenceWrite));
}

#[tokio::test]
async fn regrant_replaces_capability_set() {
    let room = make_room("doc-1", "user_1", "alice@example.com");
    let (provider, _, manager) = setup(vec![room.clone()]);
    let actor = make_profile("user_1", "Alice Li", "alice@example.com");

    manager
        .grant_access(&room.id, "bob@example.com", UserRole::Editor, &actor)
        .await
        .unwrap();
    manager
        .grant_access(&room.id, "bob@example.com", UserRole::Viewer, &actor)
        .await
        .unwrap();

    let stored = provider.stored(&room.id).unwrap();
    let caps = stored.users_accesses.capabilities_of(&email("bob@example.com")).unwrap();
    assert!(!caps.can_write());
    assert!(caps.can_read());
}

#[tokio::test]
async fn grant_rejects_non_email_identifier() {
    let room = make_room("doc-1", "user_1", "alice@example.com");
    let (provider, _, manager) = setup(vec![room.clone()]);
    let actor = make_profile("user_1", "Alice Li", "alice@example.com");

    let err = manager
        .grant_access(&room.id, "user_2", UserRole::Editor, &actor)
        .await
        .unwrap_err();

    assert!(matches!(err, CloudError::Email(_)));
    assert_eq!(provider.update_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn grant_on_missing_room_is_not_found() {
    let (_, _, manager) = setup(vec![]);
    let actor = make_profile("user_1", "Alice Li", "alice@example.com");

    let err = manager
        .grant_access(
            &coscribe_types::RoomId::new("ghost"),
            "bob@example.com",
            UserRole::Editor,
            &actor,
        )
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn grant_invalidates_document_view() {
    let room = make_room("doc-1", "user_1", "alice@example.com");
    let (_, views, manager) = setup(vec![room.clone()]);
    let actor = make_profile("user_1", "Alice Li", "alice@example.com");

    manager
        .grant_access(&room.id, "bob@example.com", UserRole::Editor, &actor)
        .await
        .unwrap();

    assert_eq!(views.paths(), vec!["/documents/doc-1".to_string()]);
}

// ── Notifications ──

#[tokio::test]
async fn grant_emits_exactly_one_notification() {
    let room = make_room("doc-1", "user_1", "alice@example.com");
    let (provider, _, manager) = setup(vec![room.clone()]);
    let actor = make_profile("user_1", "Alice Li", "alice@example.com");

    manager
        .grant_access(&room.id, "bob@example.com", UserRole::Editor, &actor)
        .await
        .unwrap();

    let notifications = provider.notifications.lock().unwrap();
    assert_eq!(notifications.len(), 1);
    let n = &notifications[0];
    assert_eq!(n.user_id, email("bob@example.com"));
    assert_eq!(n.kind, NotificationKind::DocumentAccess);
    assert_eq!(n.room_id, room.id);
    assert_eq!(n.activity_data.role, UserRole::Editor);
    assert_eq!(n.activity_data.granted_by, "Alice Li");
    assert_eq!(n.activity_data.email, email("alice@example.com"));
    assert_eq!(
        n.activity_data.message,
        "Alice Li granted you editor access to a document"
    );
}

#[tokio::test]
async fn notification_subject_ids_are_unique() {
    let room = make_room("doc-1", "user_1", "alice@example.com");
    let (provider, _, manager) = setup(vec![room.clone()]);
    let actor = make_profile("user_1", "Alice Li", "alice@example.com");

    manager
        .grant_access(&room.id, "bob@example.com", UserRole::Editor, &actor)
        .await
        .unwrap();
    manager
        .grant_access(&room.id, "carol@example.com", UserRole::Viewer, &actor)
        .await
        .unwrap();

    let notifications = provider.notifications.lock().unwrap();
    assert_eq!(notifications.len(), 2);
    assert_ne!(notifications[0].subject_id, notifications[1].subject_id);
}

#[tokio::test]
async fn failed_notification_never_rolls_back_grant() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("coscribe_cloud=debug"))
        .with_test_writer()
        .try_init();

    let room = make_room("doc-1", "user_1", "alice@example.com");
    let (provider, _, manager) = setup(vec![room.clone()]);
    provider.fail_notifications.store(true, Ordering::SeqCst);
    let actor = make_profile("user_1", "Alice Li", "alice@example.com");

    manager
        .grant_access(&room.id, "bob@example.com", UserRole::Editor, &actor)
        .await
        .unwrap();

    let stored = provider.stored(&room.id).unwrap();
    assert!(stored.users_accesses.contains(&email("bob@example.com")));
    assert!(provider.notifications.lock().unwrap().is_empty());
}

// ── Collaborator resolution ──

#[tokio::test]
async fn collaborators_carry_implied_roles() {
    let mut room = make_room("doc-1", "user_1", "alice@example.com");
    room.users_accesses
        .grant(email("bob@example.com"), UserRole::Editor.capabilities());
    room.users_accesses
        .grant(email("carol@example.com"), UserRole::Viewer.capabilities());
    let (_, _, manager) = setup(vec![room.clone()]);
    let resolver = resolver_with(vec![
        record("user_1", "Alice", "Li", "alice@example.com"),
        record("user_2", "Bob", "Ng", "bob@example.com"),
        record("user_3", "Carol", "Diaz", "carol@example.com"),
    ]);

    let collaborators = manager.collaborators_in(&room, &resolver).await.unwrap();

    assert_eq!(collaborators.len(), 3);
    assert_eq!(collaborators[0].profile.name, "Alice Li");
    assert_eq!(collaborators[0].role, UserRole::Editor);
    assert_eq!(collaborators[1].role, UserRole::Editor);
    assert_eq!(collaborators[2].profile.name, "Carol Diaz");
    assert_eq!(collaborators[2].role, UserRole::Viewer);
}

#[tokio::test]
async fn collaborators_skip_unresolvable_entries() {
    let mut room = make_room("doc-1", "user_1", "alice@example.com");
    room.users_accesses
        .grant(email("ghost@example.com"), UserRole::Viewer.capabilities());
    let (_, _, manager) = setup(vec![room.clone()]);
    let resolver = resolver_with(vec![record("user_1", "Alice", "Li", "alice@example.com")]);

    let collaborators = manager.collaborators_in(&room, &resolver).await.unwrap();

    assert_eq!(collaborators.len(), 1);
    assert_eq!(collaborators[0].profile.email, email("alice@example.com"));
}
