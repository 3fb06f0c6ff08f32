//! Voice selection and provider descriptors.
//!
//! A descriptor is the complete set of parameters a provider factory needs to
//! build a handle. Descriptors are plain data so they can be logged, compared
//! in tests and serialised into job records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::SttLanguage;

/// Deepgram model used for every call.
pub const DEFAULT_STT_MODEL: &str = "nova-2";

/// Groq-hosted model driving the conversation.
pub const DEFAULT_LLM_MODEL: &str = "meta-llama/llama-4-maverick-17b-128e-instruct";

pub const DEFAULT_VAD_MODEL: &str = "silero";

pub const SARVAM_TARGET_LANGUAGE: &str = "hi-IN";
pub const SARVAM_SPEAKER: &str = "vidya";
pub const SARVAM_MODEL: &str = "bulbul:v2";

pub const GEMINI_TTS_MODEL: &str = "models/gemini-2.5-flash-preview-tts";
pub const GEMINI_VOICE_NAME: &str = "Zephyr";
pub const GEMINI_TTS_INSTRUCTIONS: &str = "Speak.";

/// Text-to-speech voice offered to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceChoice {
    #[default]
    Sarvam,
    Gemini,
}

impl VoiceChoice {
    /// Maps a caller-supplied selection, falling back to Sarvam for anything
    /// unrecognised.
    pub fn from_selection(selection: &str) -> Self {
        selection.parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sarvam => "sarvam",
            Self::Gemini => "gemini",
        }
    }

    /// Builds the TTS descriptor for this voice.
    pub fn tts_descriptor(self) -> TtsDescriptor {
        match self {
            Self::Sarvam => TtsDescriptor::Sarvam {
                target_language_code: SARVAM_TARGET_LANGUAGE.to_string(),
                speaker: SARVAM_SPEAKER.to_string(),
                model: SARVAM_MODEL.to_string(),
            },
            Self::Gemini => TtsDescriptor::Gemini {
                model: GEMINI_TTS_MODEL.to_string(),
                voice_name: GEMINI_VOICE_NAME.to_string(),
                instructions: GEMINI_TTS_INSTRUCTIONS.to_string(),
            },
        }
    }
}

impl fmt::Display for VoiceChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoiceChoice {
    type Err = ParseVoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sarvam" => Ok(Self::Sarvam),
            "gemini" => Ok(Self::Gemini),
            _ => Err(ParseVoiceError(s.to_string())),
        }
    }
}

/// Error returned when strictly parsing an unknown voice name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown voice: {0}")]
pub struct ParseVoiceError(pub String);

/// Parameters for a text-to-speech provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum TtsDescriptor {
    Sarvam {
        target_language_code: String,
        speaker: String,
        model: String,
    },
    Gemini {
        model: String,
        voice_name: String,
        /// Static style prompt sent with every synthesis request.
        instructions: String,
    },
}

impl TtsDescriptor {
    pub fn provider_name(&self) -> &'static str {
        match self {
            Self::Sarvam { .. } => "sarvam",
            Self::Gemini { .. } => "gemini",
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Self::Sarvam { model, .. } | Self::Gemini { model, .. } => model,
        }
    }
}

/// Parameters for the speech-to-text provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SttDescriptor {
    pub model: String,
    pub language: SttLanguage,
}

impl SttDescriptor {
    pub fn new(model: impl Into<String>, language: SttLanguage) -> Self {
        Self {
            model: model.into(),
            language,
        }
    }
}

/// Parameters for the language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmDescriptor {
    pub model: String,
}

impl Default for LlmDescriptor {
    fn default() -> Self {
        Self {
            model: DEFAULT_LLM_MODEL.to_string(),
        }
    }
}

/// Parameters for the voice activity detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VadDescriptor {
    pub model: String,
}

impl Default for VadDescriptor {
    fn default() -> Self {
        Self {
            model: DEFAULT_VAD_MODEL.to_string(),
        }
    }
}
