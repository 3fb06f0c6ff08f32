use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use vaani_types::voice::{DEFAULT_LLM_MODEL, DEFAULT_STT_MODEL};

/// Join tokens handed to web callers live for 15 minutes.
fn default_token_ttl_seconds() -> u64 {
    900
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LiveKitConfig {
    #[serde(default)]
    pub url: String,
    /// Browser-facing URL returned in connection details. Empty means `url`.
    #[serde(default)]
    pub public_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing)]
    pub api_secret: String,
    /// JWT token TTL in seconds for LiveKit join tokens. Default: 900 (15 minutes).
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: u64,
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            public_url: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("public_url", &self.public_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}

impl LiveKitConfig {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            ..Self::default()
        }
    }

    /// True when url, key and secret are all present.
    pub fn is_complete(&self) -> bool {
        !self.url.is_empty() && !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

fn default_llm_model() -> String {
    DEFAULT_LLM_MODEL.to_string()
}

fn default_stt_model() -> String {
    DEFAULT_STT_MODEL.to_string()
}

fn default_settle_delay_ms() -> u64 {
    1000
}

fn default_participant_timeout_secs() -> u64 {
    60
}

/// Per-worker settings threaded into every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSettings {
    #[serde(default = "default_llm_model")]
    pub llm_model: String,

    #[serde(default = "default_stt_model")]
    pub stt_model: String,

    /// Pause between session start and the greeting so the caller's audio
    /// track is subscribed before the first utterance.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    #[serde(default = "default_participant_timeout_secs")]
    pub participant_timeout_secs: u64,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            llm_model: default_llm_model(),
            stt_model: default_stt_model(),
            settle_delay_ms: default_settle_delay_ms(),
            participant_timeout_secs: default_participant_timeout_secs(),
        }
    }
}

impl AgentSettings {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn participant_timeout(&self) -> Duration {
        Duration::from_secs(self.participant_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret() {
        let config = LiveKitConfig::new("ws://localhost:7880", "devkey", "supersecret");
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("supersecret"));
    }

    #[test]
    fn completeness() {
        assert!(!LiveKitConfig::default().is_complete());
        assert!(LiveKitConfig::new("ws://lk", "k", "s").is_complete());
        assert!(!LiveKitConfig::new("ws://lk", "k", "").is_complete());
    }

    #[test]
    fn settings_defaults() {
        let settings = AgentSettings::default();
        assert_eq!(settings.settle_delay(), Duration::from_secs(1));
        assert_eq!(settings.stt_model, "nova-2");
        assert_eq!(
            settings.llm_model,
            "meta-llama/llama-4-maverick-17b-128e-instruct"
        );
    }

    #[test]
    fn settings_from_partial_toml() {
        let settings: AgentSettings = toml::from_str("settle_delay_ms = 250").unwrap();
        assert_eq!(settings.settle_delay_ms, 250);
        assert_eq!(settings.participant_timeout_secs, 60);
    }
}
