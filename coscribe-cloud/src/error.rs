//! Typed errors for provider-facing operations.
//!
//! Every operation returns `CloudResult` so callers can route failures
//! to distinct UI states (redirect home, show a retry toast, reject the
//! form) instead of treating all of them as "something went wrong".

use coscribe_types::{EmailAddress, EmailError, RoomId};
use thiserror::Error;

/// Result type for provider-facing operations.
pub type CloudResult<T> = Result<T, CloudError>;

/// Errors from room, sharing, and identity operations.
#[derive(Debug, Error)]
pub enum CloudError {
    /// The requester holds no entry in the room's access map.
    #[error("{email} has no access to room {room_id}")]
    AccessDenied { room_id: RoomId, email: EmailAddress },

    /// An attempt to revoke the room creator's own access.
    #[error("the creator cannot be removed from room {room_id}")]
    SelfRemoval { room_id: RoomId },

    /// The collaboration backend has no such room.
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    /// Non-success response from a hosted provider.
    #[error("provider rejected request ({status}): {message}")]
    Provider { status: u16, message: String },

    /// Transport-level failure, including the bounded request timeout.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A caller-supplied identifier was not an email address.
    #[error(transparent)]
    Email(#[from] EmailError),
}

impl CloudError {
    /// True for failures the UI should treat as "you are not allowed in".
    pub fn is_access_denied(&self) -> bool {
        matches!(self, CloudError::AccessDenied { .. })
    }

    /// True when the target room does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CloudError::RoomNotFound(_))
    }
}
