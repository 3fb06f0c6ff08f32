use crate::error::BoxError;
use async_trait::async_trait;

/// A remote participant as seen when they join the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub identity: String,
    /// Raw metadata string from the participant's join token, if any.
    pub metadata: Option<String>,
}

impl Participant {
    pub fn new(identity: impl Into<String>, metadata: Option<String>) -> Self {
        Self {
            identity: identity.into(),
            metadata,
        }
    }
}

/// Media room the call job is dispatched to.
#[async_trait]
pub trait RoomGateway: Send + Sync {
    fn name(&self) -> &str;

    async fn connect(&self) -> Result<(), BoxError>;

    /// Resolves once the first remote participant has joined.
    async fn wait_for_participant(&self) -> Result<Participant, BoxError>;
}
