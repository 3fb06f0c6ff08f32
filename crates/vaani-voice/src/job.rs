use crate::error::VoiceError;
use crate::resolver::resolve;
use crate::room::RoomGateway;
use crate::session::{CallState, RunningSession, SessionBootstrapper, SessionManager};
use std::sync::Arc;
use tracing::{info, info_span, Instrument};

/// Everything one dispatched call job needs.
#[derive(Clone)]
pub struct JobContext {
    pub room: Arc<dyn RoomGateway>,
    pub session: Arc<dyn SessionManager>,
    pub bootstrapper: SessionBootstrapper,
}

impl JobContext {
    pub fn new(
        room: Arc<dyn RoomGateway>,
        session: Arc<dyn SessionManager>,
        bootstrapper: SessionBootstrapper,
    ) -> Self {
        Self {
            room,
            session,
            bootstrapper,
        }
    }
}

/// Handles one call: connect, wait for the caller, resolve their
/// configuration and start the conversation.
///
/// Errors are returned to the job runtime, which decides whether to retry the
/// whole job. Dropping the returned future cancels the call at its current
/// await point.
pub async fn entrypoint(ctx: JobContext) -> Result<RunningSession, VoiceError> {
    let span = info_span!("call", room = ctx.room.name(), identity = tracing::field::Empty);

    async move {
        CallState::Connecting.enter();
        ctx.room.connect().await.map_err(VoiceError::Room)?;

        let timeout = ctx.bootstrapper.settings().participant_timeout();
        let participant = tokio::time::timeout(timeout, ctx.room.wait_for_participant())
            .await
            .map_err(|_| VoiceError::ParticipantNeverJoined {
                room: ctx.room.name().to_string(),
                waited_secs: timeout.as_secs(),
            })?
            .map_err(VoiceError::Room)?;

        tracing::Span::current().record("identity", participant.identity.as_str());
        info!(identity = %participant.identity, "participant joined");
        CallState::ParticipantJoined.enter();

        let config = resolve(&participant.identity, participant.metadata.as_deref());
        info!(
            origin = %config.origin,
            language = %config.language,
            voice = %config.voice,
            "call configured"
        );
        CallState::Configured.enter();

        ctx.bootstrapper
            .bootstrap(config, ctx.session.clone(), ctx.room.as_ref())
            .await
    }
    .instrument(span)
    .await
}
