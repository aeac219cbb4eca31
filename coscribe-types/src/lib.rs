//! Shared vocabulary for CoScribe.
//!
//! Pure data and pure functions, no I/O:
//! - Capability tokens and the role-to-capability mapping
//! - Validated email identities (the only access-map key)
//! - Room records, access maps, and access mutations
//! - Display profiles and notification payloads
//! - Presentation helpers (relative timestamps, collaborator colors)
//!
//! Everything that talks to the hosted providers lives in
//! `coscribe-cloud`.

pub mod capability;
pub mod display;
pub mod email;
pub mod notification;
pub mod profile;
pub mod role;
pub mod room;

pub use capability::{Capability, CapabilitySet};
pub use email::{EmailAddress, EmailError};
pub use notification::{AccessActivity, NotificationKind};
pub use profile::{Collaborator, UserProfile};
pub use role::UserRole;
pub use room::{AccessChange, AccessMap, Room, RoomId, RoomMetadata};
