//! Hosted-provider configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the hosted-provider clients.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Base URL for the collaboration backend's REST API
    /// (e.g., "https://api.rooms.coscribe.app").
    pub rooms_api_base_url: String,

    /// Bearer secret for the collaboration backend.
    pub rooms_api_key: String,

    /// Base URL for the identity provider's REST API.
    pub identity_api_base_url: String,

    /// Bearer secret for the identity provider.
    pub identity_api_key: String,

    /// Per-request timeout in seconds. A hung provider call fails the
    /// serving request instead of blocking it indefinitely.
    pub request_timeout_secs: u64,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            rooms_api_base_url: "https://api.rooms.coscribe.app".to_string(),
            rooms_api_key: String::new(),
            identity_api_base_url: "https://api.id.coscribe.app".to_string(),
            identity_api_key: String::new(),
            request_timeout_secs: 30,
        }
    }
}
