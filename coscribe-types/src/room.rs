//! Room records, access maps, and access mutations.
//!
//! A room is the unit of sharing: one collaborative document plus the
//! per-email capability grants that control who may open it. The shapes
//! here mirror the collaboration backend's wire format (camelCase keys)
//! so rooms deserialize straight off its responses.

use crate::capability::CapabilitySet;
use crate::email::EmailAddress;
use crate::role::UserRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque unique identifier for a room.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Generates a fresh globally unique id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Wraps a backend-issued id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata stored alongside a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMetadata {
    /// Identity-provider id of the creator.
    pub creator_id: String,
    /// Creator's email. This access entry can never be revoked.
    pub email: EmailAddress,
    /// Document title. Mutable; new documents start as "Untitled".
    pub title: String,
}

/// Capability grants per collaborator email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessMap(BTreeMap<EmailAddress, CapabilitySet>);

impl AccessMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Map with a single entry, the shape every room starts with.
    pub fn solo(email: EmailAddress, capabilities: CapabilitySet) -> Self {
        let mut map = BTreeMap::new();
        map.insert(email, capabilities);
        Self(map)
    }

    pub fn contains(&self, email: &EmailAddress) -> bool {
        self.0.contains_key(email)
    }

    pub fn capabilities_of(&self, email: &EmailAddress) -> Option<&CapabilitySet> {
        self.0.get(email)
    }

    pub fn grant(&mut self, email: EmailAddress, capabilities: CapabilitySet) {
        self.0.insert(email, capabilities);
    }

    pub fn revoke(&mut self, email: &EmailAddress) -> Option<CapabilitySet> {
        self.0.remove(email)
    }

    /// Collaborator emails in stable order.
    pub fn emails(&self) -> impl Iterator<Item = &EmailAddress> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EmailAddress, &CapabilitySet)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single per-email access mutation.
///
/// Removal is its own variant rather than a null-valued grant; the
/// backend's removal sentinel (`null`) exists only at the serialization
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessChange {
    /// Replace the email's capabilities with exactly this set.
    Grant(CapabilitySet),
    /// Remove the email's access entry entirely.
    Revoke,
}

impl AccessChange {
    /// The wire form: a token array for grants, `None` (null) for removal.
    pub fn as_wire(&self) -> Option<&CapabilitySet> {
        match self {
            AccessChange::Grant(capabilities) => Some(capabilities),
            AccessChange::Revoke => None,
        }
    }
}

impl Serialize for AccessChange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_wire().serialize(serializer)
    }
}

/// A room as the collaboration backend stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub metadata: RoomMetadata,
    pub users_accesses: AccessMap,
    /// Capabilities granted to users with no access entry. Empty keeps
    /// the document private to the listed collaborators.
    #[serde(default)]
    pub default_accesses: CapabilitySet,
    /// Omitted on some backend responses; defaults to the fetch time.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// True if the email holds any access entry.
    pub fn grants_access(&self, email: &EmailAddress) -> bool {
        self.users_accesses.contains(email)
    }

    /// The role the email's capability set presents as, if any.
    pub fn role_of(&self, email: &EmailAddress) -> Option<UserRole> {
        self.users_accesses
            .capabilities_of(email)
            .map(CapabilitySet::implied_role)
    }

    /// True if `email` is the recorded creator.
    pub fn created_by(&self, email: &EmailAddress) -> bool {
        self.metadata.email == *email
    }
}
