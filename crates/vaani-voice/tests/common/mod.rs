//! In-memory stand-ins for the agent runtime.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, Notify};
use tokio::time::Instant;
use vaani_types::{LlmDescriptor, ProviderKind, SttDescriptor, TtsDescriptor, VadDescriptor};
use vaani_voice::{
    Agent, AgentSettings, BoxError, EventCallback, JobContext, MetricsEvent, MetricsSink,
    Observable, Participant, ProviderFactory, ProviderHandle, RoomGateway, SessionBootstrapper,
    SessionManager, SharedHandle,
};

pub struct FakeHandle {
    kind: ProviderKind,
    observable: bool,
    listeners: Mutex<Vec<(String, EventCallback)>>,
}

impl FakeHandle {
    pub fn new(kind: ProviderKind, observable: bool) -> Self {
        Self {
            kind,
            observable,
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Fires `event` on every listener registered for it.
    pub fn emit(&self, event: &str, data: serde_json::Value) {
        let listeners = self.listeners.lock().unwrap();
        for (name, callback) in listeners.iter() {
            if name == event {
                callback(data.clone());
            }
        }
    }

    pub fn registered_events(&self) -> Vec<String> {
        self.listeners
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl fmt::Debug for FakeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeHandle")
            .field("kind", &self.kind)
            .field("observable", &self.observable)
            .finish()
    }
}

impl Observable for FakeHandle {
    fn on(&self, event: &str, callback: EventCallback) {
        self.listeners
            .lock()
            .unwrap()
            .push((event.to_string(), callback));
    }
}

impl ProviderHandle for FakeHandle {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn as_observable(&self) -> Option<&dyn Observable> {
        if self.observable {
            Some(self)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Built {
    Stt(SttDescriptor),
    Tts(TtsDescriptor),
    Llm(LlmDescriptor),
    Vad(VadDescriptor),
}

pub struct FakeProviders {
    pub observable_stt: bool,
    pub observable_tts: bool,
    pub fail: Option<ProviderKind>,
    pub built: Mutex<Vec<Built>>,
    pub handles: Mutex<HashMap<ProviderKind, Arc<FakeHandle>>>,
}

impl Default for FakeProviders {
    fn default() -> Self {
        Self {
            observable_stt: true,
            observable_tts: true,
            fail: None,
            built: Mutex::new(Vec::new()),
            handles: Mutex::new(HashMap::new()),
        }
    }
}

impl FakeProviders {
    pub fn handle(&self, kind: ProviderKind) -> Arc<FakeHandle> {
        self.handles.lock().unwrap()[&kind].clone()
    }

    pub fn built(&self) -> Vec<Built> {
        self.built.lock().unwrap().clone()
    }

    fn make(&self, kind: ProviderKind, observable: bool, built: Built) -> Result<SharedHandle, BoxError> {
        if self.fail == Some(kind) {
            return Err(format!("{} vendor rejected credentials", kind).into());
        }
        self.built.lock().unwrap().push(built);
        let handle = Arc::new(FakeHandle::new(kind, observable));
        self.handles.lock().unwrap().insert(kind, handle.clone());
        let shared: SharedHandle = handle;
        Ok(shared)
    }
}

#[async_trait]
impl ProviderFactory for FakeProviders {
    async fn create_stt(&self, descriptor: &SttDescriptor) -> Result<SharedHandle, BoxError> {
        self.make(
            ProviderKind::Stt,
            self.observable_stt,
            Built::Stt(descriptor.clone()),
        )
    }

    async fn create_tts(&self, descriptor: &TtsDescriptor) -> Result<SharedHandle, BoxError> {
        self.make(
            ProviderKind::Tts,
            self.observable_tts,
            Built::Tts(descriptor.clone()),
        )
    }

    async fn create_llm(&self, descriptor: &LlmDescriptor) -> Result<SharedHandle, BoxError> {
        self.make(ProviderKind::Llm, true, Built::Llm(descriptor.clone()))
    }

    async fn load_vad(&self, descriptor: &VadDescriptor) -> Result<SharedHandle, BoxError> {
        self.make(ProviderKind::Vad, true, Built::Vad(descriptor.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started { room: String, instructions: String },
    Reply(String),
}

#[derive(Default)]
pub struct FakeSession {
    pub fail_start: bool,
    pub events: Mutex<Vec<(Instant, SessionEvent)>>,
    pub started: Notify,
}

impl FakeSession {
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(_, e)| e.clone())
            .collect()
    }

    pub fn timeline(&self) -> Vec<(Instant, SessionEvent)> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionManager for FakeSession {
    async fn start(&self, agent: Agent, room: &dyn RoomGateway) -> Result<(), BoxError> {
        if self.fail_start {
            return Err("room rejected agent".into());
        }
        self.events.lock().unwrap().push((
            Instant::now(),
            SessionEvent::Started {
                room: room.name().to_string(),
                instructions: agent.instructions,
            },
        ));
        self.started.notify_one();
        Ok(())
    }

    async fn generate_reply(&self, instructions: &str) -> Result<(), BoxError> {
        self.events
            .lock()
            .unwrap()
            .push((Instant::now(), SessionEvent::Reply(instructions.to_string())));
        Ok(())
    }
}

pub struct FakeRoom {
    pub name: String,
    pub participant: Option<Participant>,
}

impl FakeRoom {
    pub fn with_participant(identity: &str, metadata: Option<&str>) -> Self {
        Self {
            name: "room_1".to_string(),
            participant: Some(Participant::new(identity, metadata.map(str::to_string))),
        }
    }

    pub fn empty() -> Self {
        Self {
            name: "room_1".to_string(),
            participant: None,
        }
    }
}

#[async_trait]
impl RoomGateway for FakeRoom {
    fn name(&self) -> &str {
        &self.name
    }

    async fn connect(&self) -> Result<(), BoxError> {
        Ok(())
    }

    async fn wait_for_participant(&self) -> Result<Participant, BoxError> {
        match &self.participant {
            Some(p) => Ok(p.clone()),
            None => std::future::pending().await,
        }
    }
}

/// Forwards every recorded metric to a channel.
pub struct ChannelSink(pub mpsc::UnboundedSender<MetricsEvent>);

#[async_trait]
impl MetricsSink for ChannelSink {
    async fn record(&self, event: MetricsEvent) {
        let _ = self.0.send(event);
    }
}

pub struct Harness {
    pub providers: Arc<FakeProviders>,
    pub session: Arc<FakeSession>,
    pub metrics: mpsc::UnboundedReceiver<MetricsEvent>,
    pub ctx: JobContext,
}

pub fn harness(room: FakeRoom, providers: FakeProviders, session: FakeSession) -> Harness {
    harness_with(room, providers, session, AgentSettings::default())
}

pub fn harness_with(
    room: FakeRoom,
    providers: FakeProviders,
    session: FakeSession,
    settings: AgentSettings,
) -> Harness {
    let providers = Arc::new(providers);
    let session = Arc::new(session);
    let (tx, rx) = mpsc::unbounded_channel();
    let bootstrapper =
        SessionBootstrapper::new(settings, providers.clone(), Arc::new(ChannelSink(tx)));
    let ctx = JobContext::new(Arc::new(room), session.clone(), bootstrapper);
    Harness {
        providers,
        session,
        metrics: rx,
        ctx,
    }
}
