//! Capability tokens granted per collaborator per room.
//!
//! The collaboration backend authorizes sessions against these tokens;
//! this crate only decides which tokens a role maps to and what a set of
//! tokens presents as in the UI.

use crate::role::UserRole;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// An atomic permission on a room, in the backend's token vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Read room storage.
    #[serde(rename = "room:read")]
    Read,
    /// Mutate room storage. Implies read on the backend side.
    #[serde(rename = "room:write")]
    Write,
    /// Broadcast cursor and selection presence without storage writes.
    #[serde(rename = "room:presence:write")]
    PresenceWrite,
}

impl Capability {
    /// The wire token for this capability.
    pub fn as_token(&self) -> &'static str {
        match self {
            Capability::Read => "room:read",
            Capability::Write => "room:write",
            Capability::PresenceWrite => "room:presence:write",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// A deduplicated, stably ordered set of capabilities.
///
/// Serializes as the backend's token array, e.g. `["room:write"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// The empty set: no access at all.
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn insert(&mut self, capability: Capability) {
        self.0.insert(capability);
    }

    /// True if the set allows storage writes.
    pub fn can_write(&self) -> bool {
        self.contains(Capability::Write)
    }

    /// True if the set allows reading room storage.
    pub fn can_read(&self) -> bool {
        self.contains(Capability::Read) || self.contains(Capability::Write)
    }

    /// The role this set presents as: write access makes an editor,
    /// anything else a viewer.
    pub fn implied_role(&self) -> UserRole {
        if self.can_write() {
            UserRole::Editor
        } else {
            UserRole::Viewer
        }
    }

    /// Iterates capabilities in stable (declaration) order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
