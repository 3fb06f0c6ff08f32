//! Descriptor-backed stand-ins for the agent runtime.
//!
//! There is no Rust port of the vendor plugins, so dispatched jobs run
//! against handles that only record the descriptor they were built from.
//! The LiveKit side is real: connecting a dispatched room makes sure the room
//! exists on the configured server. A production deployment replaces
//! [`DescriptorProviders`] and [`LoggedSession`] with adapters to its runtime.

use async_trait::async_trait;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use vaani_types::{LlmDescriptor, ProviderKind, SttDescriptor, TtsDescriptor, VadDescriptor};
use vaani_voice::{
    Agent, BoxError, EventCallback, Observable, Participant, ProviderFactory, ProviderHandle,
    RoomGateway, SessionManager, SharedHandle, VoiceService,
};

/// A room whose participant was announced by the dispatcher.
pub struct DispatchedRoom {
    name: String,
    participant: Participant,
    voice_service: Arc<VoiceService>,
}

impl DispatchedRoom {
    pub fn new(
        name: impl Into<String>,
        participant: Participant,
        voice_service: Arc<VoiceService>,
    ) -> Self {
        Self {
            name: name.into(),
            participant,
            voice_service,
        }
    }
}

#[async_trait]
impl RoomGateway for DispatchedRoom {
    fn name(&self) -> &str {
        &self.name
    }

    async fn connect(&self) -> Result<(), BoxError> {
        if !self.voice_service.is_enabled() {
            debug!(room = %self.name, "LiveKit not configured, skipping room creation");
            return Ok(());
        }
        let room = self.voice_service.create_room(&self.name).await?;
        info!(room = %room.name, sid = %room.sid, "room ready");
        Ok(())
    }

    async fn wait_for_participant(&self) -> Result<Participant, BoxError> {
        Ok(self.participant.clone())
    }
}

/// Handle that keeps its descriptor and the metrics callbacks attached to it.
pub struct DescriptorHandle {
    kind: ProviderKind,
    descriptor: serde_json::Value,
    listeners: Mutex<Vec<(String, EventCallback)>>,
}

impl DescriptorHandle {
    fn shared(
        kind: ProviderKind,
        descriptor: &impl serde::Serialize,
    ) -> Result<SharedHandle, BoxError> {
        let descriptor = serde_json::to_value(descriptor)?;
        info!(provider = %kind, descriptor = %descriptor, "provider created");
        let handle: SharedHandle = Arc::new(Self::new(kind, descriptor));
        Ok(handle)
    }

    pub fn new(kind: ProviderKind, descriptor: serde_json::Value) -> Self {
        Self {
            kind,
            descriptor,
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn descriptor(&self) -> &serde_json::Value {
        &self.descriptor
    }

    /// Delivers `data` to every callback attached for `event`.
    ///
    /// Returns the number of callbacks invoked.
    pub fn emit(&self, event: &str, data: serde_json::Value) -> usize {
        let callbacks: Vec<EventCallback> = match self.listeners.lock() {
            Ok(listeners) => listeners
                .iter()
                .filter(|(name, _)| name == event)
                .map(|(_, callback)| callback.clone())
                .collect(),
            Err(_) => return 0,
        };
        for callback in &callbacks {
            callback(data.clone());
        }
        callbacks.len()
    }
}

impl fmt::Debug for DescriptorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorHandle")
            .field("kind", &self.kind)
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

impl Observable for DescriptorHandle {
    fn on(&self, event: &str, callback: EventCallback) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push((event.to_string(), callback));
        }
    }
}

impl ProviderHandle for DescriptorHandle {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn as_observable(&self) -> Option<&dyn Observable> {
        Some(self)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorProviders;

#[async_trait]
impl ProviderFactory for DescriptorProviders {
    async fn create_stt(&self, descriptor: &SttDescriptor) -> Result<SharedHandle, BoxError> {
        DescriptorHandle::shared(ProviderKind::Stt, descriptor)
    }

    async fn create_tts(&self, descriptor: &TtsDescriptor) -> Result<SharedHandle, BoxError> {
        DescriptorHandle::shared(ProviderKind::Tts, descriptor)
    }

    async fn create_llm(&self, descriptor: &LlmDescriptor) -> Result<SharedHandle, BoxError> {
        DescriptorHandle::shared(ProviderKind::Llm, descriptor)
    }

    async fn load_vad(&self, descriptor: &VadDescriptor) -> Result<SharedHandle, BoxError> {
        DescriptorHandle::shared(ProviderKind::Vad, descriptor)
    }
}

/// Session that logs what it would say.
#[derive(Debug, Default)]
pub struct LoggedSession;

#[async_trait]
impl SessionManager for LoggedSession {
    async fn start(&self, agent: Agent, room: &dyn RoomGateway) -> Result<(), BoxError> {
        info!(
            room = room.name(),
            instructions = %agent.instructions,
            "agent session started"
        );
        Ok(())
    }

    async fn generate_reply(&self, instructions: &str) -> Result<(), BoxError> {
        info!(instructions, "generating reply");
        Ok(())
    }
}
