//! Access grants and the notifications they emit.
//!
//! The share flow in one place: map the role to its capability set,
//! patch the room, notify the recipient, invalidate the document view.
//! The grant commits before the notification is attempted; a failed
//! dispatch is logged and never rolls the grant back.

use crate::error::CloudResult;
use crate::identity::ProfileResolver;
use crate::provider::{NotificationRequest, RoomPatch, RoomProvider};
use crate::views::{NoopViewCache, ViewCache};
use coscribe_types::{
    AccessActivity, AccessChange, Collaborator, EmailAddress, NotificationKind, Room, RoomId,
    UserProfile, UserRole,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Orchestrates access grants and collaborator resolution.
pub struct ShareManager {
    provider: Arc<dyn RoomProvider>,
    views: Arc<dyn ViewCache>,
}

impl ShareManager {
    pub fn new(provider: Arc<dyn RoomProvider>) -> Self {
        Self::with_view_cache(provider, Arc::new(NoopViewCache))
    }

    pub fn with_view_cache(provider: Arc<dyn RoomProvider>, views: Arc<dyn ViewCache>) -> Self {
        Self { provider, views }
    }

    /// Grants `role` on a document to `email` and notifies them.
    ///
    /// The access patch replaces the email's capability set with the
    /// role's mapped set; granting a lower role is how access gets
    /// downgraded. Exactly one notification is dispatched per grant,
    /// after the grant commits.
    pub async fn grant_access(
        &self,
        room_id: &RoomId,
        email: &str,
        role: UserRole,
        granted_by: &UserProfile,
    ) -> CloudResult<Room> {
        let email = EmailAddress::parse(email)?;

        let patch = RoomPatch::access_change(
            email.clone(),
            AccessChange::Grant(role.capabilities()),
        );
        let room = self.provider.update_room(room_id, patch).await?;
        info!("granted {role} access on document {room_id} to {email}");

        let request = NotificationRequest {
            user_id: email.clone(),
            kind: NotificationKind::DocumentAccess,
            subject_id: Uuid::new_v4().simple().to_string(),
            activity_data: AccessActivity {
                role,
                message: format!(
                    "{} granted you {role} access to a document",
                    granted_by.name
                ),
                granted_by: granted_by.name.clone(),
                avatar: granted_by.avatar.clone(),
                email: granted_by.email.clone(),
            },
            room_id: room_id.clone(),
        };

        // The grant is already committed; a lost notification must not
        // undo it.
        if let Err(e) = self.provider.trigger_notification(request).await {
            warn!("notification dispatch to {email} failed: {e}");
        }

        self.views.invalidate(&format!("/documents/{room_id}"));
        Ok(room)
    }

    /// Resolves a room's access map into display collaborators.
    ///
    /// Entries the identity provider cannot resolve are skipped; every
    /// resolved profile carries the role its capability set implies.
    pub async fn collaborators_in(
        &self,
        room: &Room,
        resolver: &ProfileResolver,
    ) -> CloudResult<Vec<Collaborator>> {
        let emails: Vec<&str> = room.users_accesses.emails().map(EmailAddress::as_str).collect();
        let profiles = resolver.profiles_for(&emails).await?;

        let collaborators = room
            .users_accesses
            .iter()
            .zip(profiles)
            .filter_map(|((_, capabilities), profile)| {
                profile.map(|profile| Collaborator {
                    profile,
                    role: capabilities.implied_role(),
                })
            })
            .collect();

        Ok(collaborators)
    }
}
