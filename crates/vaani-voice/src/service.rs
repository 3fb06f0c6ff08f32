use crate::config::LiveKitConfig;
use crate::error::VoiceError;
use livekit_api::access_token::{AccessToken, VideoGrants};
use livekit_api::services::room::{CreateRoomOptions, RoomClient};
use livekit_protocol::Room;
use rand::Rng;
use serde::Serialize;
use std::time::Duration;
use vaani_types::CallMetadata;

/// Upper bound (exclusive) for the random suffix of generated identities and
/// room names.
const RANDOM_SUFFIX_RANGE: u32 = 10_000;

/// What a browser needs to join a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDetails {
    pub server_url: String,
    pub room_name: String,
    pub participant_token: String,
    pub participant_name: String,
}

#[derive(Debug)]
pub struct VoiceService {
    config: LiveKitConfig,
    room_client: RoomClient,
}

impl VoiceService {
    pub fn new(config: LiveKitConfig) -> Self {
        let room_client =
            RoomClient::with_api_key(&config.url, &config.api_key, &config.api_secret);
        Self {
            config,
            room_client,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.config.url.is_empty()
    }

    pub fn get_url(&self) -> &str {
        &self.config.url
    }

    /// Returns the browser-facing URL. Falls back to the internal URL if no
    /// public URL is configured.
    pub fn get_public_url(&self) -> &str {
        if self.config.public_url.is_empty() {
            &self.config.url
        } else {
            &self.config.public_url
        }
    }

    pub async fn create_room(&self, name: &str) -> Result<Room, VoiceError> {
        let options = CreateRoomOptions::default();

        self.room_client
            .create_room(name, options)
            .await
            .map_err(|e| VoiceError::RoomService(e.to_string()))
    }

    /// Mints a join token. `metadata` becomes the participant's metadata,
    /// which the agent reads back when the participant joins.
    pub fn generate_join_token(
        &self,
        room_name: &str,
        participant_identity: &str,
        participant_name: &str,
        metadata: Option<&str>,
    ) -> Result<String, VoiceError> {
        let mut token = AccessToken::with_api_key(&self.config.api_key, &self.config.api_secret)
            .with_identity(participant_identity)
            .with_name(participant_name)
            .with_grants(VideoGrants {
                room_join: true,
                room: room_name.to_string(),
                can_publish: true,
                can_subscribe: true,
                can_publish_data: true,
                ..Default::default()
            })
            .with_ttl(Duration::from_secs(self.config.token_ttl_seconds));

        if let Some(metadata) = metadata {
            token = token.with_metadata(metadata);
        }

        token.to_jwt().map_err(VoiceError::LiveKit)
    }

    /// Issues connection details for a new web caller in a fresh room.
    ///
    /// The caller's selections travel as participant metadata so the agent
    /// can resolve them without a side channel.
    pub fn issue_connection_details(
        &self,
        selections: &CallMetadata,
    ) -> Result<ConnectionDetails, VoiceError> {
        if !self.config.is_complete() {
            return Err(VoiceError::Config(
                "LiveKit url, api_key and api_secret must be configured".to_string(),
            ));
        }

        let mut rng = rand::thread_rng();
        let identity = format!("user_{}", rng.gen_range(0..RANDOM_SUFFIX_RANGE));
        let room_name = format!("room_{}", rng.gen_range(0..RANDOM_SUFFIX_RANGE));

        let token = self.generate_join_token(
            &room_name,
            &identity,
            &identity,
            Some(&selections.to_json()),
        )?;

        Ok(ConnectionDetails {
            server_url: self.get_public_url().to_string(),
            room_name,
            participant_token: token,
            participant_name: identity,
        })
    }
}
