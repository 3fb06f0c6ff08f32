//! Worker configuration loading from file and environment variables.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;
use vaani_voice::{AgentSettings, LiveKitConfig};

/// Top-level worker configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// LiveKit server credentials.
    #[serde(default)]
    pub livekit: LiveKitConfig,

    /// Settings applied to every call.
    #[serde(default)]
    pub agent: AgentSettings,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "vaani_voice=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8081
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults, then
/// applies environment overrides.
///
/// Environment variable overrides:
/// - `VAANI_HOST` overrides `server.host`
/// - `VAANI_PORT` overrides `server.port`
/// - `VAANI_LOG_LEVEL` overrides `logging.level`
/// - `VAANI_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `LIVEKIT_URL`, `LIVEKIT_PUBLIC_URL`, `LIVEKIT_API_KEY` and
///   `LIVEKIT_API_SECRET` override the `livekit` section
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
}

/// Applies overrides from `lookup`, which maps a variable name to its value.
pub fn apply_env_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(host) = lookup("VAANI_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = lookup("VAANI_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(level) = lookup("VAANI_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("VAANI_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Some(url) = lookup("LIVEKIT_URL") {
        config.livekit.url = url;
    }
    if let Some(public_url) = lookup("LIVEKIT_PUBLIC_URL") {
        config.livekit.public_url = public_url;
    }
    if let Some(key) = lookup("LIVEKIT_API_KEY") {
        config.livekit.api_key = key;
    }
    if let Some(secret) = lookup("LIVEKIT_API_SECRET") {
        config.livekit.api_secret = secret;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = load_config(path.to_str()).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.agent.settle_delay_ms, 1000);
    }

    #[test]
    fn parses_all_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [server]
            port = 9000

            [logging]
            level = "debug"
            json = true

            [livekit]
            url = "ws://livekit:7880"
            api_key = "key"
            api_secret = "secret"

            [agent]
            settle_delay_ms = 500
            llm_model = "llama-3.3-70b-versatile"
            "#
        )
        .unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert!(config.logging.json);
        assert_eq!(config.livekit.url, "ws://livekit:7880");
        assert_eq!(config.livekit.token_ttl_seconds, 900);
        assert_eq!(config.agent.settle_delay_ms, 500);
        assert_eq!(config.agent.llm_model, "llama-3.3-70b-versatile");
        assert_eq!(config.agent.stt_model, "nova-2");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[server\nport = ").unwrap();
        assert!(matches!(
            load_config(file.path().to_str()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            ("VAANI_PORT", "7000"),
            ("VAANI_HOST", "0.0.0.0"),
            ("VAANI_LOG_JSON", "1"),
            ("LIVEKIT_URL", "wss://lk.example.com"),
            ("LIVEKIT_API_KEY", "k"),
            ("LIVEKIT_API_SECRET", "s"),
        ]
        .into_iter()
        .collect();

        let config = apply_env_overrides(Config::default(), |key| {
            env.get(key).map(|v| v.to_string())
        });
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert!(config.logging.json);
        assert_eq!(config.livekit.url, "wss://lk.example.com");
        assert!(config.livekit.is_complete());
    }

    #[test]
    fn unparsable_port_is_ignored() {
        let config = apply_env_overrides(Config::default(), |key| {
            (key == "VAANI_PORT").then(|| "not-a-port".to_string())
        });
        assert_eq!(config.server.port, 8081);
    }
}
