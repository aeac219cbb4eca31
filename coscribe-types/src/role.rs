//! Collaborator roles and the capability sets they grant.

use crate::capability::{Capability, CapabilitySet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user holds on a document.
///
/// Roles exist only on this side of the wire: the backend stores the
/// derived capability set, never the role name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum UserRole {
    Creator,
    Editor,
    #[default]
    Viewer,
}

impl UserRole {
    /// Parses a role token.
    ///
    /// Total: unrecognized tokens fall open to `Viewer`, the
    /// least-privilege role that still lets the user into the room.
    pub fn parse(token: &str) -> Self {
        match token {
            "creator" => UserRole::Creator,
            "editor" => UserRole::Editor,
            _ => UserRole::Viewer,
        }
    }

    /// Capability set granted to this role.
    ///
    /// Creators and editors both get write access (write implies read on
    /// the backend side); viewers get read plus presence so their cursors
    /// stay visible to others.
    pub fn capabilities(&self) -> CapabilitySet {
        match self {
            UserRole::Creator | UserRole::Editor => [Capability::Write].into_iter().collect(),
            UserRole::Viewer => {
                [Capability::Read, Capability::PresenceWrite].into_iter().collect()
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Creator => "creator",
            UserRole::Editor => "editor",
            UserRole::Viewer => "viewer",
        }
    }
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
