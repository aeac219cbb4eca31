//! Identity provider client and profile resolution.
//!
//! Collaborators are stored as bare emails; the identity provider is
//! the only source of names and avatars. The resolver keeps lookup
//! results aligned with the input list so the UI can zip them back
//! against whatever it asked about, with unknown users as explicit
//! `None` slots rather than silent omissions.

use crate::config::CloudConfig;
use crate::error::{CloudError, CloudResult};
use async_trait::async_trait;
use coscribe_types::{EmailAddress, UserProfile};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// A raw identity record as the provider returns it (snake_case wire).
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email_addresses: Vec<EmailEntry>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One address entry on an identity record.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailEntry {
    pub email_address: EmailAddress,
}

impl UserRecord {
    /// Normalizes the record into a display profile.
    ///
    /// The primary address is the first one listed. Records with no
    /// address yield `None` since there is nothing to key them by.
    pub fn into_profile(self) -> Option<UserProfile> {
        let email = self.email_addresses.into_iter().next()?.email_address;
        let name = [self.first_name, self.last_name]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        Some(UserProfile {
            id: self.id,
            name,
            email,
            avatar: self.image_url.unwrap_or_default(),
        })
    }
}

/// Lookup surface of the hosted identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fetches raw records for the given addresses, in provider order.
    /// Addresses the provider does not know are simply absent.
    async fn users_by_email(&self, emails: &[EmailAddress]) -> CloudResult<Vec<UserRecord>>;
}

/// HTTP client for the hosted identity API.
pub struct IdentityApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl IdentityApiClient {
    pub fn new(config: &CloudConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: config.identity_api_base_url.trim_end_matches('/').to_string(),
            api_key: config.identity_api_key.clone(),
        }
    }
}

#[async_trait]
impl IdentityProvider for IdentityApiClient {
    async fn users_by_email(&self, emails: &[EmailAddress]) -> CloudResult<Vec<UserRecord>> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        // Repeated email_address params, one per requested address.
        let query: Vec<(&str, &str)> = emails
            .iter()
            .map(|email| ("email_address", email.as_str()))
            .collect();

        let resp = self
            .client
            .get(format!("{}/v1/users", self.base_url))
            .bearer_auth(&self.api_key)
            .query(&query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(CloudError::Provider { status: status.as_u16(), message });
        }

        Ok(resp.json().await?)
    }
}

/// Resolves emails to display profiles, preserving input order.
pub struct ProfileResolver {
    identity: Arc<dyn IdentityProvider>,
}

impl ProfileResolver {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    /// Resolves each input to its profile.
    ///
    /// The output has exactly the input's length; position `i` is `None`
    /// when the provider does not know that address, or when the input
    /// is not an email address at all (the provider keys users by email
    /// only, so anything else can never resolve).
    pub async fn profiles_for(&self, emails: &[&str]) -> CloudResult<Vec<Option<UserProfile>>> {
        let parsed: Vec<Option<EmailAddress>> = emails
            .iter()
            .map(|raw| EmailAddress::parse(raw).ok())
            .collect();

        let lookup: Vec<EmailAddress> = parsed.iter().flatten().cloned().collect();
        let records = self.identity.users_by_email(&lookup).await?;
        let profiles: Vec<UserProfile> = records
            .into_iter()
            .filter_map(UserRecord::into_profile)
            .collect();

        let resolved: Vec<Option<UserProfile>> = parsed
            .iter()
            .map(|slot| {
                slot.as_ref()
                    .and_then(|email| profiles.iter().find(|p| p.email == *email).cloned())
            })
            .collect();

        let found = resolved.iter().filter(|p| p.is_some()).count();
        debug!("resolved {found} of {} requested profiles", emails.len());
        Ok(resolved)
    }
}
