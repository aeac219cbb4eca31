//! HTTP client for the collaboration backend's room API.
//!
//! Handles bearer authentication, the camelCase wire format, and status
//! mapping to typed errors. Uses reqwest with JSON serialization and a
//! bounded per-request timeout.

use crate::config::CloudConfig;
use crate::error::{CloudError, CloudResult};
use crate::provider::{CreateRoom, NotificationRequest, RoomPatch, RoomProvider};
use async_trait::async_trait;
use coscribe_types::{EmailAddress, Room, RoomId};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// HTTP client for the hosted room API.
pub struct RoomApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RoomApiClient {
    pub fn new(config: &CloudConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: config.rooms_api_base_url.trim_end_matches('/').to_string(),
            api_key: config.rooms_api_key.clone(),
        }
    }

    // ── Request plumbing ──

    async fn get(&self, path: &str) -> CloudResult<Response> {
        let url = format!("{}{}", self.base_url, path);
        Ok(self.client.get(&url).bearer_auth(&self.api_key).send().await?)
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> CloudResult<Response> {
        let url = format!("{}{}", self.base_url, path);
        Ok(self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?)
    }

    async fn delete(&self, path: &str) -> CloudResult<Response> {
        let url = format!("{}{}", self.base_url, path);
        Ok(self
            .client
            .delete(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?)
    }

    /// Maps non-success statuses to typed errors. A 404 becomes
    /// `RoomNotFound` when the request targeted a specific room.
    async fn check(resp: Response, room_id: Option<&RoomId>) -> CloudResult<Response> {
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = room_id {
                return Err(CloudError::RoomNotFound(id.clone()));
            }
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(CloudError::Provider { status: status.as_u16(), message });
        }
        Ok(resp)
    }
}

#[async_trait]
impl RoomProvider for RoomApiClient {
    async fn create_room(&self, id: &RoomId, body: CreateRoom) -> CloudResult<Room> {
        #[derive(Serialize)]
        struct Req<'a> {
            id: &'a RoomId,
            #[serde(flatten)]
            body: CreateRoom,
        }

        let resp = self.post("/v2/rooms", &Req { id, body }).await?;
        let resp = Self::check(resp, None).await?;
        let room: Room = resp.json().await?;
        debug!("created room {}", room.id);
        Ok(room)
    }

    async fn get_room(&self, id: &RoomId) -> CloudResult<Room> {
        let resp = self.get(&format!("/v2/rooms/{id}")).await?;
        let resp = Self::check(resp, Some(id)).await?;
        Ok(resp.json().await?)
    }

    async fn list_rooms(&self, user: &EmailAddress) -> CloudResult<Vec<Room>> {
        let url = format!("{}/v2/rooms", self.base_url);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&[("userId", user.as_str())])
            .send()
            .await?;
        let resp = Self::check(resp, None).await?;

        #[derive(Deserialize)]
        struct Resp {
            data: Vec<Room>,
        }
        let resp: Resp = resp.json().await?;
        debug!("listed {} rooms for {user}", resp.data.len());
        Ok(resp.data)
    }

    async fn update_room(&self, id: &RoomId, patch: RoomPatch) -> CloudResult<Room> {
        let resp = self.post(&format!("/v2/rooms/{id}"), &patch).await?;
        let resp = Self::check(resp, Some(id)).await?;
        Ok(resp.json().await?)
    }

    async fn delete_room(&self, id: &RoomId) -> CloudResult<()> {
        let resp = self.delete(&format!("/v2/rooms/{id}")).await?;
        Self::check(resp, Some(id)).await?;
        Ok(())
    }

    async fn trigger_notification(&self, request: NotificationRequest) -> CloudResult<()> {
        let resp = self.post("/v2/inbox-notifications/trigger", &request).await?;
        Self::check(resp, None).await?;
        debug!(
            "queued {} notification for {}",
            request.kind.as_wire(),
            request.user_id
        );
        Ok(())
    }
}
