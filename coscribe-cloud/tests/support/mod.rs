//! Shared in-memory fakes for directory and sharing tests.

use async_trait::async_trait;
use chrono::Utc;
use coscribe_cloud::error::{CloudError, CloudResult};
use coscribe_cloud::provider::{CreateRoom, NotificationRequest, RoomPatch, RoomProvider};
use coscribe_cloud::views::ViewCache;
use coscribe_types::{
    AccessChange, AccessMap, CapabilitySet, EmailAddress, Room, RoomId, RoomMetadata, UserProfile,
    UserRole,
};
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory room provider with the backend's merge semantics for
/// partial updates.
pub struct MemoryRoomProvider {
    rooms: Mutex<BTreeMap<RoomId, Room>>,
    /// Notifications captured for assertions.
    pub notifications: Mutex<Vec<NotificationRequest>>,
    /// Number of update_room calls received.
    pub update_calls: AtomicUsize,
    /// When set, trigger_notification fails with a 500.
    pub fail_notifications: AtomicBool,
}

impl MemoryRoomProvider {
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(BTreeMap::new()),
            notifications: Mutex::new(Vec::new()),
            update_calls: AtomicUsize::new(0),
            fail_notifications: AtomicBool::new(false),
        }
    }

    pub fn with_rooms(rooms: Vec<Room>) -> Self {
        let provider = Self::new();
        {
            let mut map = provider.rooms.lock().unwrap();
            for room in rooms {
                map.insert(room.id.clone(), room);
            }
        }
        provider
    }

    /// Snapshot of a stored room, for asserting on provider state.
    pub fn stored(&self, id: &RoomId) -> Option<Room> {
        self.rooms.lock().unwrap().get(id).cloned()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.lock().unwrap().len()
    }
}

#[async_trait]
impl RoomProvider for MemoryRoomProvider {
    async fn create_room(&self, id: &RoomId, body: CreateRoom) -> CloudResult<Room> {
        let room = Room {
            id: id.clone(),
            metadata: body.metadata,
            users_accesses: body.users_accesses,
            default_accesses: body.default_accesses,
            created_at: Utc::now(),
        };
        self.rooms.lock().unwrap().insert(id.clone(), room.clone());
        Ok(room)
    }

    async fn get_room(&self, id: &RoomId) -> CloudResult<Room> {
        self.rooms
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| CloudError::RoomNotFound(id.clone()))
    }

    async fn list_rooms(&self, user: &EmailAddress) -> CloudResult<Vec<Room>> {
        Ok(self
            .rooms
            .lock()
            .unwrap()
            .values()
            .filter(|room| room.users_accesses.contains(user))
            .cloned()
            .collect())
    }

    async fn update_room(&self, id: &RoomId, patch: RoomPatch) -> CloudResult<Room> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        let mut rooms = self.rooms.lock().unwrap();
        let room = rooms
            .get_mut(id)
            .ok_or_else(|| CloudError::RoomNotFound(id.clone()))?;

        if let Some(metadata) = patch.metadata {
            if let Some(title) = metadata.title {
                room.metadata.title = title;
            }
        }
        if let Some(changes) = patch.users_accesses {
            for (email, change) in changes {
                match change {
                    AccessChange::Grant(capabilities) => {
                        room.users_accesses.grant(email, capabilities);
                    }
                    AccessChange::Revoke => {
                        room.users_accesses.revoke(&email);
                    }
                }
            }
        }
        if let Some(defaults) = patch.default_accesses {
            room.default_accesses = defaults;
        }

        Ok(room.clone())
    }

    async fn delete_room(&self, id: &RoomId) -> CloudResult<()> {
        self.rooms
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CloudError::RoomNotFound(id.clone()))
    }

    async fn trigger_notification(&self, request: NotificationRequest) -> CloudResult<()> {
        if self.fail_notifications.load(Ordering::SeqCst) {
            return Err(CloudError::Provider {
                status: 500,
                message: "inbox unavailable".to_string(),
            });
        }
        self.notifications.lock().unwrap().push(request);
        Ok(())
    }
}

/// View cache that records every invalidated path.
#[derive(Default)]
pub struct RecordingViewCache {
    pub invalidated: Mutex<Vec<String>>,
}

impl RecordingViewCache {
    pub fn paths(&self) -> Vec<String> {
        self.invalidated.lock().unwrap().clone()
    }
}

impl ViewCache for RecordingViewCache {
    fn invalidate(&self, path: &str) {
        self.invalidated.lock().unwrap().push(path.to_string());
    }
}

// ── Builders ──

pub fn email(raw: &str) -> EmailAddress {
    EmailAddress::parse(raw).unwrap()
}

/// A room created by `creator_email`, in the shape create_document
/// produces.
pub fn make_room(id: &str, creator_id: &str, creator_email: &str) -> Room {
    Room {
        id: RoomId::new(id),
        metadata: RoomMetadata {
            creator_id: creator_id.to_string(),
            email: email(creator_email),
            title: "Untitled".to_string(),
        },
        users_accesses: AccessMap::solo(email(creator_email), UserRole::Creator.capabilities()),
        default_accesses: CapabilitySet::empty(),
        created_at: Utc::now(),
    }
}

#[allow(dead_code)]
pub fn make_profile(id: &str, name: &str, address: &str) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        name: name.to_string(),
        email: email(address),
        avatar: format!("https://img.example.com/{id}.png"),
    }
}
