//! Provider seam for the hosted collaboration backend.
//!
//! All room state lives in the backend; this crate only orchestrates.
//! The backend is an injected trait object rather than an ambient SDK
//! singleton so the directory and sharing layers can be exercised
//! against an in-process fake.

use crate::error::CloudResult;
use async_trait::async_trait;
use coscribe_types::{
    AccessActivity, AccessChange, AccessMap, CapabilitySet, EmailAddress, NotificationKind, Room,
    RoomId, RoomMetadata,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Initial state for a new room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoom {
    pub metadata: RoomMetadata,
    pub users_accesses: AccessMap,
    pub default_accesses: CapabilitySet,
}

/// Partial metadata update. Only present keys change.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetadataPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Partial room update. Absent fields are left untouched by the
/// backend; access changes are merged per email, with `Revoke`
/// serializing as the backend's removal null.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_accesses: Option<BTreeMap<EmailAddress, AccessChange>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_accesses: Option<CapabilitySet>,
}

impl RoomPatch {
    /// Patch that retitles the room and changes nothing else.
    pub fn retitle(title: impl Into<String>) -> Self {
        Self {
            metadata: Some(MetadataPatch { title: Some(title.into()) }),
            ..Self::default()
        }
    }

    /// Patch that applies a single access change and nothing else.
    pub fn access_change(email: EmailAddress, change: AccessChange) -> Self {
        Self {
            users_accesses: Some(BTreeMap::from([(email, change)])),
            ..Self::default()
        }
    }
}

/// An inbox notification to deliver to one recipient.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    /// Recipient, keyed the same way room accesses are.
    pub user_id: EmailAddress,
    pub kind: NotificationKind,
    /// Fresh unique id; the inbox threads notifications by subject.
    pub subject_id: String,
    pub activity_data: AccessActivity,
    pub room_id: RoomId,
}

/// Operations the hosted collaboration backend exposes.
#[async_trait]
pub trait RoomProvider: Send + Sync {
    /// Creates a room with the given id and initial state.
    async fn create_room(&self, id: &RoomId, body: CreateRoom) -> CloudResult<Room>;

    /// Fetches a single room.
    async fn get_room(&self, id: &RoomId) -> CloudResult<Room>;

    /// Lists every room where `user` holds an access entry.
    async fn list_rooms(&self, user: &EmailAddress) -> CloudResult<Vec<Room>>;

    /// Applies a partial update and returns the room as stored.
    async fn update_room(&self, id: &RoomId, patch: RoomPatch) -> CloudResult<Room>;

    /// Deletes a room.
    async fn delete_room(&self, id: &RoomId) -> CloudResult<()>;

    /// Queues an inbox notification for delivery.
    async fn trigger_notification(&self, request: NotificationRequest) -> CloudResult<()>;
}
