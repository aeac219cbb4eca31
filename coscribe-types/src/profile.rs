//! Display profiles resolved from the identity provider.

use crate::email::EmailAddress;
use crate::role::UserRole;
use serde::{Deserialize, Serialize};

/// A user as the UI displays them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Identity-provider user id.
    pub id: String,
    /// Full display name; absent name parts are skipped when joining.
    pub name: String,
    pub email: EmailAddress,
    /// Avatar image URL. Empty when the provider has none.
    pub avatar: String,
}

/// A resolved access-map entry: the profile plus the role its
/// capability set implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub profile: UserProfile,
    pub role: UserRole,
}
