//! Session bootstrapping: provider construction, metrics wiring, session
//! start and the opening greeting.

use crate::config::AgentSettings;
use crate::error::{BoxError, VoiceError};
use crate::metrics::{MetricsObserver, MetricsSink};
use crate::provider::{ProviderFactory, SharedHandle};
use crate::resolver::CallConfig;
use crate::room::RoomGateway;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{info, Span};
use vaani_types::{LlmDescriptor, MetricsKind, ProviderKind, VadDescriptor};

/// Per-call progress, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Connecting,
    ParticipantJoined,
    Configured,
    SessionStarted,
    GreetingSent,
}

impl CallState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::ParticipantJoined => "participant_joined",
            Self::Configured => "configured",
            Self::SessionStarted => "session_started",
            Self::GreetingSent => "greeting_sent",
        }
    }

    pub(crate) fn enter(self) -> Self {
        info!(state = self.as_str(), "call state");
        self
    }
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The conversational agent handed to the session.
#[derive(Debug, Clone)]
pub struct Agent {
    pub instructions: String,
    pub stt: SharedHandle,
    pub tts: SharedHandle,
    pub llm: SharedHandle,
    pub vad: SharedHandle,
}

/// Conversation session owned by the external runtime.
#[async_trait]
pub trait SessionManager: Send + Sync {
    async fn start(&self, agent: Agent, room: &dyn RoomGateway) -> Result<(), BoxError>;

    /// Asks the agent to speak, steered by `instructions`.
    async fn generate_reply(&self, instructions: &str) -> Result<(), BoxError>;
}

/// A started session whose greeting has been issued.
pub struct RunningSession {
    pub config: CallConfig,
    pub session: Arc<dyn SessionManager>,
    /// Metric types that were subscribed.
    pub observed: Vec<MetricsKind>,
    pub state: CallState,
}

impl fmt::Debug for RunningSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunningSession")
            .field("config", &self.config)
            .field("observed", &self.observed)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Builds and starts the conversation for a resolved call.
#[derive(Clone)]
pub struct SessionBootstrapper {
    settings: AgentSettings,
    providers: Arc<dyn ProviderFactory>,
    metrics: Arc<dyn MetricsSink>,
}

impl SessionBootstrapper {
    pub fn new(
        settings: AgentSettings,
        providers: Arc<dyn ProviderFactory>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            settings,
            providers,
            metrics,
        }
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    /// Runs the bootstrap sequence. Every step is a cancellation point; no
    /// step is retried.
    pub async fn bootstrap(
        &self,
        config: CallConfig,
        session: Arc<dyn SessionManager>,
        room: &dyn RoomGateway,
    ) -> Result<RunningSession, VoiceError> {
        let stt = self
            .providers
            .create_stt(&config.stt_descriptor(&self.settings.stt_model))
            .await
            .map_err(|source| VoiceError::Provider {
                provider: ProviderKind::Stt,
                source,
            })?;

        let tts_descriptor = config.tts_descriptor();
        let tts = self
            .providers
            .create_tts(&tts_descriptor)
            .await
            .map_err(|source| VoiceError::Provider {
                provider: ProviderKind::Tts,
                source,
            })?;

        let llm = self
            .providers
            .create_llm(&LlmDescriptor {
                model: self.settings.llm_model.clone(),
            })
            .await
            .map_err(|source| VoiceError::Provider {
                provider: ProviderKind::Llm,
                source,
            })?;

        let vad = self
            .providers
            .load_vad(&VadDescriptor::default())
            .await
            .map_err(|source| VoiceError::Provider {
                provider: ProviderKind::Vad,
                source,
            })?;

        info!(
            stt_language = %config.stt_language,
            tts = tts_descriptor.provider_name(),
            tts_model = tts_descriptor.model(),
            llm = %self.settings.llm_model,
            "providers ready"
        );

        let observer =
            MetricsObserver::new(self.metrics.clone(), Handle::current(), Span::current());
        let mut observed = observer.attach(&llm, &[MetricsKind::Llm]);
        observed.extend(observer.attach(&stt, &[MetricsKind::Stt, MetricsKind::Eou]));
        observed.extend(observer.attach(&tts, &[MetricsKind::Tts]));
        observed.extend(observer.attach(&vad, &[MetricsKind::Vad]));

        let agent = Agent {
            instructions: config.instructions.to_string(),
            stt,
            tts,
            llm,
            vad,
        };

        session
            .start(agent, room)
            .await
            .map_err(VoiceError::SessionStart)?;
        CallState::SessionStarted.enter();

        // TODO: wait on the runtime's track-subscribed event instead once the
        // session trait exposes one.
        tokio::time::sleep(self.settings.settle_delay()).await;

        session
            .generate_reply(config.greeting_prompt)
            .await
            .map_err(VoiceError::Reply)?;

        Ok(RunningSession {
            config,
            session,
            observed,
            state: CallState::GreetingSent.enter(),
        })
    }
}

impl fmt::Debug for SessionBootstrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionBootstrapper")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
