use crate::prompts::Prompts;
use tracing::{error, info};
use vaani_types::{
    CallMetadata, CallOrigin, Language, SttDescriptor, SttLanguage, TtsDescriptor, VoiceChoice,
};

/// Language, voice and prompt selection for one call.
///
/// Produced once when the participant joins and consumed by the
/// bootstrapper. Fully determined by the caller's origin and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallConfig {
    pub origin: CallOrigin,
    pub language: Language,
    pub voice: VoiceChoice,
    pub stt_language: SttLanguage,
    pub instructions: &'static str,
    pub greeting_prompt: &'static str,
}

impl CallConfig {
    fn new(origin: CallOrigin, language: Language, voice: VoiceChoice) -> Self {
        let prompts = Prompts::for_language(&language);
        Self {
            origin,
            stt_language: language.stt_language(),
            language,
            voice,
            instructions: prompts.instructions,
            greeting_prompt: prompts.greeting,
        }
    }

    /// Hindi with the Sarvam voice.
    pub fn defaults(origin: CallOrigin) -> Self {
        Self::new(origin, Language::Hindi, VoiceChoice::Sarvam)
    }

    pub fn stt_descriptor(&self, model: &str) -> SttDescriptor {
        SttDescriptor::new(model, self.stt_language)
    }

    pub fn tts_descriptor(&self) -> TtsDescriptor {
        self.voice.tts_descriptor()
    }
}

/// Resolves the call configuration for a participant.
///
/// Phone callers always get Hindi with Sarvam. Web callers pick language and
/// voice through token metadata. Each key is read on its own: a missing key
/// keeps its default and an unrecognised value normalises. Only a blob that
/// is not a JSON object falls back to both defaults.
pub fn resolve(identity: &str, metadata: Option<&str>) -> CallConfig {
    let origin = CallOrigin::classify(identity);

    if origin == CallOrigin::Telephony {
        info!(identity, "phone call detected, forcing Hindi + Sarvam");
        return CallConfig::defaults(origin);
    }

    let Some(raw) = metadata.filter(|m| !m.is_empty()) else {
        return CallConfig::defaults(origin);
    };

    match CallMetadata::from_json(raw) {
        Ok(meta) => {
            let language = meta
                .language
                .as_deref()
                .map(Language::from_code)
                .unwrap_or_default();
            let voice = meta
                .voice
                .as_deref()
                .map(VoiceChoice::from_selection)
                .unwrap_or_default();
            info!(
                identity,
                language = %language,
                voice = %voice,
                "web caller selections"
            );
            CallConfig::new(origin, language, voice)
        }
        Err(e) => {
            error!(identity, error = %e, "failed to parse participant metadata, using defaults");
            CallConfig::defaults(origin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telephony_ignores_metadata() {
        let config = resolve("sip_caller", Some(r#"{"language":"en","voice":"gemini"}"#));
        assert_eq!(config, CallConfig::defaults(CallOrigin::Telephony));
    }

    #[test]
    fn empty_and_blank_metadata_keep_defaults() {
        for raw in ["", "  "] {
            assert_eq!(
                resolve("user_1", Some(raw)),
                CallConfig::defaults(CallOrigin::Web)
            );
        }
    }

    #[test]
    fn non_string_voice_keeps_language_selection() {
        let config = resolve("user_1", Some(r#"{"language":"en","voice":5}"#));
        assert_eq!(config.language, Language::English);
        assert_eq!(config.voice, VoiceChoice::Sarvam);
        assert_eq!(config.stt_language, SttLanguage::En);
    }

    #[test]
    fn non_string_language_follows_english_branch() {
        let config = resolve("user_1", Some(r#"{"language":7,"voice":"gemini"}"#));
        assert_eq!(config.language, Language::Other("7".to_string()));
        assert_eq!(config.stt_language, SttLanguage::En);
        assert_eq!(config.voice, VoiceChoice::Gemini);
    }

    #[test]
    fn null_values_keep_defaults() {
        let config = resolve("user_1", Some(r#"{"language":null,"voice":null}"#));
        assert_eq!(config, CallConfig::defaults(CallOrigin::Web));
    }

    #[test]
    fn descriptors_follow_config() {
        let config = resolve("user_1", Some(r#"{"language":"en","voice":"gemini"}"#));
        assert_eq!(config.stt_descriptor("nova-2").language, SttLanguage::En);
        assert_eq!(config.tts_descriptor().provider_name(), "gemini");
    }
}
