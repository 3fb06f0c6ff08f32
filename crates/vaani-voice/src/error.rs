use thiserror::Error;
use vaani_types::ProviderKind;

/// Error type returned by external collaborators (room, providers, session).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("LiveKit API error: {0}")]
    LiveKit(#[from] livekit_api::access_token::AccessTokenError),

    #[error("Room service error: {0}")]
    RoomService(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Room connection failed: {0}")]
    Room(#[source] BoxError),

    #[error("No participant joined room '{room}' within {waited_secs}s")]
    ParticipantNeverJoined { room: String, waited_secs: u64 },

    #[error("{provider} provider construction failed: {source}")]
    Provider {
        provider: ProviderKind,
        #[source]
        source: BoxError,
    },

    #[error("Session start failed: {0}")]
    SessionStart(#[source] BoxError),

    #[error("Greeting generation failed: {0}")]
    Reply(#[source] BoxError),
}
