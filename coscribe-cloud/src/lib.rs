//! Hosted-provider clients and sharing orchestration for CoScribe.
//!
//! The hard problems (merge, presence fan-out, inbox delivery) live in
//! the hosted collaboration backend; names and avatars live in the
//! hosted identity provider. This crate is the service layer between
//! them:
//! - Typed HTTP clients for both providers, behind injectable trait
//!   seams with bounded timeouts
//! - The room directory (create, fetch with access check, list,
//!   rename, remove collaborator, delete)
//! - The sharing workflow (role to capabilities, grant, notification)
//! - Profile resolution that keeps results aligned with the input list

pub mod api_client;
pub mod config;
pub mod directory;
pub mod error;
pub mod identity;
pub mod provider;
pub mod sharing;
pub mod views;

pub use api_client::RoomApiClient;
pub use config::CloudConfig;
pub use directory::RoomDirectory;
pub use error::{CloudError, CloudResult};
pub use identity::{IdentityApiClient, IdentityProvider, ProfileResolver, UserRecord};
pub use provider::{CreateRoom, MetadataPatch, NotificationRequest, RoomPatch, RoomProvider};
pub use sharing::ShareManager;
pub use views::{NoopViewCache, ViewCache};
