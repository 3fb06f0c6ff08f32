//! Shared value types for the Vaani voice agent.
//!
//! This crate holds the vocabulary every other crate speaks: where a call
//! came from, which language and voice it should use, the descriptors handed
//! to provider factories, and the metadata blob web callers attach to their
//! join token.
//!
//! Nothing here performs I/O. Parsing is strict where it is exposed through
//! `FromStr`; the lenient, normalising paths used during call resolution live
//! next to the types they produce.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod metadata;
pub mod voice;

pub use metadata::CallMetadata;
pub use voice::{
    LlmDescriptor, ParseVoiceError, SttDescriptor, TtsDescriptor, VadDescriptor, VoiceChoice,
};

/// Identity prefix LiveKit SIP bridges assign to phone participants.
pub const SIP_IDENTITY_PREFIX: &str = "sip_";

/// E.164 numbers used directly as identities also mark a phone caller.
pub const E164_IDENTITY_PREFIX: &str = "+";

/// Where an inbound call originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOrigin {
    /// A phone caller bridged in over SIP.
    Telephony,
    /// A browser participant that joined with a connection-details token.
    Web,
}

impl CallOrigin {
    /// Classifies a participant identity.
    pub fn classify(identity: &str) -> Self {
        if identity.starts_with(SIP_IDENTITY_PREFIX) || identity.starts_with(E164_IDENTITY_PREFIX)
        {
            Self::Telephony
        } else {
            Self::Web
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Telephony => "telephony",
            Self::Web => "web",
        }
    }
}

impl fmt::Display for CallOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conversation language selected for a call.
///
/// Only Hindi gets Hindi behaviour. Any other code is kept verbatim for
/// logging but follows the English branch everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    #[default]
    Hindi,
    English,
    Other(String),
}

impl Language {
    /// Maps a language code to a `Language`. Never fails.
    pub fn from_code(code: &str) -> Self {
        match code {
            "hi" => Self::Hindi,
            "en" => Self::English,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Hindi => "hi",
            Self::English => "en",
            Self::Other(code) => code,
        }
    }

    pub fn is_hindi(&self) -> bool {
        matches!(self, Self::Hindi)
    }

    /// The speech-to-text engine only distinguishes Hindi from English.
    pub fn stt_language(&self) -> SttLanguage {
        if self.is_hindi() {
            SttLanguage::Hi
        } else {
            SttLanguage::En
        }
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.as_str().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language code passed to the speech-to-text provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SttLanguage {
    Hi,
    En,
}

impl SttLanguage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hi => "hi",
            Self::En => "en",
        }
    }
}

impl fmt::Display for SttLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The provider families a call wires together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Stt,
    Tts,
    Llm,
    Vad,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stt => "stt",
            Self::Tts => "tts",
            Self::Llm => "llm",
            Self::Vad => "vad",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics event types emitted by observable providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricsKind {
    Llm,
    Stt,
    /// End-of-utterance timing reported by the STT provider.
    Eou,
    Tts,
    Vad,
}

impl MetricsKind {
    /// Event name the provider emits this metric under.
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Eou => "eou_metrics_collected",
            _ => "metrics_collected",
        }
    }

    /// Tag used on log lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Llm => "LLM",
            Self::Stt => "STT",
            Self::Eou => "EOU",
            Self::Tts => "TTS",
            Self::Vad => "VAD",
        }
    }
}

impl fmt::Display for MetricsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
