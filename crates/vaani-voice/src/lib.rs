//! Call handling for the Vaani voice agent.
//!
//! A call job connects to its LiveKit room, waits for the caller, resolves a
//! [`CallConfig`] from the caller's identity and token metadata, and then
//! bootstraps a conversation session on the external agent runtime: STT, TTS,
//! LLM and VAD handles are built from descriptors, metrics observers are
//! attached where supported, the session is started and one greeting is
//! spoken.
//!
//! The runtime itself sits behind three traits: [`RoomGateway`],
//! [`ProviderFactory`] and [`SessionManager`]. [`VoiceService`] covers the
//! LiveKit server API side: rooms and join tokens for web callers.

pub mod config;
pub mod error;
pub mod job;
pub mod metrics;
pub mod prompts;
pub mod provider;
pub mod resolver;
pub mod room;
pub mod service;
pub mod session;

pub use config::{AgentSettings, LiveKitConfig};
pub use error::{BoxError, VoiceError};
pub use job::{entrypoint, JobContext};
pub use metrics::{MetricsEvent, MetricsObserver, MetricsSink, TracingMetricsSink};
pub use provider::{EventCallback, Observable, ProviderFactory, ProviderHandle, SharedHandle};
pub use resolver::{resolve, CallConfig};
pub use room::{Participant, RoomGateway};
pub use service::{ConnectionDetails, VoiceService};
pub use session::{Agent, CallState, RunningSession, SessionBootstrapper, SessionManager};
