//! Participant metadata attached to web join tokens.

use serde::de::Error as _;
use serde::Serialize;
use serde_json::{Map, Value};

/// Caller selections carried in the participant's token metadata.
///
/// Both keys are optional and read independently; unknown keys are ignored.
/// A JSON `null` is treated the same as a missing key, and any other
/// non-string value is kept as its JSON text so it normalises like an
/// unrecognised selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CallMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

impl CallMetadata {
    pub fn new(language: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            voice: Some(voice.into()),
        }
    }

    /// Parses the raw metadata string from a participant.
    ///
    /// Fails if the string is not JSON or not a JSON object.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str(raw)? {
            Value::Object(map) => Ok(Self {
                language: selection(&map, "language"),
                voice: selection(&map, "voice"),
            }),
            other => Err(serde_json::Error::custom(format!(
                "expected a JSON object, found {}",
                kind_name(&other)
            ))),
        }
    }

    /// Encodes the metadata the way it is embedded in a join token.
    pub fn to_json(&self) -> String {
        // Two optional strings cannot fail to serialise.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn selection(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::Null => None,
        Value::String(value) => Some(value.clone()),
        other => Some(other.to_string()),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_metadata_parses() {
        let meta = CallMetadata::from_json(r#"{"language":"en"}"#).unwrap();
        assert_eq!(meta.language.as_deref(), Some("en"));
        assert_eq!(meta.voice, None);
    }

    #[test]
    fn extra_keys_are_ignored() {
        let meta = CallMetadata::from_json(r#"{"voice":"gemini","theme":"dark"}"#).unwrap();
        assert_eq!(meta.voice.as_deref(), Some("gemini"));
    }

    #[test]
    fn non_objects_are_rejected() {
        for raw in ["[1,2,3]", r#"["en"]"#, r#"["en","gemini"]"#, "null", "\"en\"", "7"] {
            let err = CallMetadata::from_json(raw).unwrap_err();
            assert!(err.to_string().contains("expected a JSON object"), "{}", raw);
        }
        assert!(CallMetadata::from_json("not json").is_err());
        assert!(CallMetadata::from_json("  ").is_err());
    }

    #[test]
    fn keys_are_read_independently() {
        let meta = CallMetadata::from_json(r#"{"language":"en","voice":5}"#).unwrap();
        assert_eq!(meta.language.as_deref(), Some("en"));
        assert_eq!(meta.voice.as_deref(), Some("5"));

        let meta = CallMetadata::from_json(r#"{"language":7,"voice":"gemini"}"#).unwrap();
        assert_eq!(meta.language.as_deref(), Some("7"));
        assert_eq!(meta.voice.as_deref(), Some("gemini"));
    }

    #[test]
    fn null_counts_as_missing() {
        let meta = CallMetadata::from_json(r#"{"language":null,"voice":"sarvam"}"#).unwrap();
        assert_eq!(meta.language, None);
        assert_eq!(meta.voice.as_deref(), Some("sarvam"));
    }

    #[test]
    fn encodes_both_selections() {
        let json = CallMetadata::new("hi", "sarvam").to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["language"], "hi");
        assert_eq!(value["voice"], "sarvam");
    }
}
