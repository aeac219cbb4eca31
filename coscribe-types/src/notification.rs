//! Inbox notification payloads for access grants.

use crate::email::EmailAddress;
use crate::role::UserRole;
use serde::{Deserialize, Serialize};

/// Notification kinds this suite emits.
///
/// Custom kinds are namespaced with a `$` prefix in the backend's inbox
/// API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// A user was granted access to a document.
    #[serde(rename = "$documentAccess")]
    DocumentAccess,
}

impl NotificationKind {
    pub fn as_wire(&self) -> &'static str {
        match self {
            NotificationKind::DocumentAccess => "$documentAccess",
        }
    }
}

/// Activity payload carried by a document-access notification.
///
/// Everything the inbox needs to render "X granted you editor access"
/// without a second lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessActivity {
    /// Role that was granted.
    pub role: UserRole,
    /// Pre-rendered message naming the actor and role.
    pub message: String,
    /// Actor display name.
    pub granted_by: String,
    /// Actor avatar URL.
    pub avatar: String,
    /// Actor email.
    pub email: EmailAddress,
}
