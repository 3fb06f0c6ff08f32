//! Seams to the external agent runtime's provider plugins.
//!
//! The runtime owns speech recognition, synthesis, inference and voice
//! activity detection. This crate only asks a [`ProviderFactory`] for handles
//! built from descriptors and, where a handle can report metrics, subscribes
//! to them through the optional [`Observable`] capability.

use crate::error::BoxError;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use vaani_types::{LlmDescriptor, ProviderKind, SttDescriptor, TtsDescriptor, VadDescriptor};

/// Callback invoked by a provider for each emitted event payload.
pub type EventCallback = Arc<dyn Fn(serde_json::Value) + Send + Sync>;

/// Capability of handles that emit named events.
pub trait Observable: Send + Sync {
    /// Registers `callback` for every future emission of `event`.
    fn on(&self, event: &str, callback: EventCallback);
}

/// A constructed provider instance owned by the runtime.
pub trait ProviderHandle: fmt::Debug + Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Returns the observation capability if this handle has one.
    fn as_observable(&self) -> Option<&dyn Observable> {
        None
    }
}

pub type SharedHandle = Arc<dyn ProviderHandle>;

/// Builds provider handles for a call.
#[async_trait]
pub trait ProviderFactory: Send + Sync {
    async fn create_stt(&self, descriptor: &SttDescriptor) -> Result<SharedHandle, BoxError>;

    async fn create_tts(&self, descriptor: &TtsDescriptor) -> Result<SharedHandle, BoxError>;

    async fn create_llm(&self, descriptor: &LlmDescriptor) -> Result<SharedHandle, BoxError>;

    async fn load_vad(&self, descriptor: &VadDescriptor) -> Result<SharedHandle, BoxError>;
}
