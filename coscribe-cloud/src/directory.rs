//! Caller-facing document operations.
//!
//! Thin orchestration over the injected room provider: identifier
//! validation at the boundary, the access check on fetch, the
//! creator-removal guard, and view invalidation after mutations. Every
//! operation is at most two provider round-trips.

use crate::error::{CloudError, CloudResult};
use crate::provider::{CreateRoom, RoomPatch, RoomProvider};
use crate::views::{NoopViewCache, ViewCache};
use coscribe_types::{
    AccessChange, AccessMap, CapabilitySet, EmailAddress, Room, RoomId, RoomMetadata, UserRole,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Caller-facing room directory: create, fetch, list, rename, remove
/// a collaborator, delete.
pub struct RoomDirectory {
    provider: Arc<dyn RoomProvider>,
    views: Arc<dyn ViewCache>,
}

impl RoomDirectory {
    pub fn new(provider: Arc<dyn RoomProvider>) -> Self {
        Self::with_view_cache(provider, Arc::new(NoopViewCache))
    }

    pub fn with_view_cache(provider: Arc<dyn RoomProvider>, views: Arc<dyn ViewCache>) -> Self {
        Self { provider, views }
    }

    /// Creates a document owned by `email`.
    ///
    /// The new room's access map holds exactly one entry: the creator
    /// with write capability. Default accesses start empty, so the
    /// document is invisible to everyone else until shared.
    pub async fn create_document(&self, creator_id: &str, email: &str) -> CloudResult<Room> {
        let email = EmailAddress::parse(email)?;
        let id = RoomId::generate();

        let body = CreateRoom {
            metadata: RoomMetadata {
                creator_id: creator_id.to_string(),
                email: email.clone(),
                title: "Untitled".to_string(),
            },
            users_accesses: AccessMap::solo(email, UserRole::Creator.capabilities()),
            default_accesses: CapabilitySet::empty(),
        };

        let room = self.provider.create_room(&id, body).await?;
        self.views.invalidate("/");
        info!("created document {id} for {}", room.metadata.email);
        Ok(room)
    }

    /// Fetches a document for `requester`.
    ///
    /// Fails with `AccessDenied` unless the requester's email holds an
    /// access entry. The room is fetched first, so a missing room
    /// surfaces as `RoomNotFound` rather than a denial.
    pub async fn get_document(&self, room_id: &RoomId, requester: &str) -> CloudResult<Room> {
        let requester = EmailAddress::parse(requester)?;
        let room = self.provider.get_room(room_id).await?;

        if !room.grants_access(&requester) {
            debug!("denied {requester} access to document {room_id}");
            return Err(CloudError::AccessDenied { room_id: room_id.clone(), email: requester });
        }

        Ok(room)
    }

    /// Lists every document where `email` holds an access entry.
    pub async fn list_documents(&self, email: &str) -> CloudResult<Vec<Room>> {
        let email = EmailAddress::parse(email)?;
        self.provider.list_rooms(&email).await
    }

    /// Updates the document title and nothing else.
    pub async fn rename_document(&self, room_id: &RoomId, title: &str) -> CloudResult<Room> {
        let room = self.provider.update_room(room_id, RoomPatch::retitle(title)).await?;
        self.views.invalidate(&format!("/documents/{room_id}"));
        debug!("retitled document {room_id}");
        Ok(room)
    }

    /// Removes a collaborator's access entry.
    ///
    /// The recorded creator can never be removed; that check runs
    /// against the fetched room before any mutation is sent.
    pub async fn remove_collaborator(&self, room_id: &RoomId, email: &str) -> CloudResult<Room> {
        let email = EmailAddress::parse(email)?;
        let room = self.provider.get_room(room_id).await?;

        if room.created_by(&email) {
            return Err(CloudError::SelfRemoval { room_id: room_id.clone() });
        }

        let patch = RoomPatch::access_change(email.clone(), AccessChange::Revoke);
        let updated = self.provider.update_room(room_id, patch).await?;
        self.views.invalidate(&format!("/documents/{room_id}"));
        info!("removed {email} from document {room_id}");
        Ok(updated)
    }

    /// Deletes a document.
    ///
    /// Deleting an already-gone room is Ok: the caller's intent (the
    /// room no longer exists) holds either way.
    pub async fn delete_document(&self, room_id: &RoomId) -> CloudResult<()> {
        match self.provider.delete_room(room_id).await {
            Ok(()) => info!("deleted document {room_id}"),
            Err(CloudError::RoomNotFound(_)) => debug!("document {room_id} already deleted"),
            Err(e) => return Err(e),
        }
        self.views.invalidate("/");
        Ok(())
    }
}
