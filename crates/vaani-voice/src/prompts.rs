//! Fixed system prompts and greeting instructions.

use vaani_types::Language;

pub const HINDI_INSTRUCTIONS: &str = "You are a helpful agent who speaks primarily in Hindi.\n\
Never ever use emojis. Keep responses short and concise.\n\
Respond in Hindi.";

pub const ENGLISH_INSTRUCTIONS: &str = "You are a helpful agent who speaks in English.\n\
Never ever use emojis. Keep responses short and concise.\n\
Respond in English.";

pub const HINDI_GREETING: &str =
    "Greet the caller in Hindi in one short, friendly sentence and offer help.";

pub const ENGLISH_GREETING: &str = "Say 'Hello! How can I help you today?'";

/// Instruction and greeting text for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompts {
    pub instructions: &'static str,
    pub greeting: &'static str,
}

impl Prompts {
    pub fn for_language(language: &Language) -> Self {
        if language.is_hindi() {
            Self {
                instructions: HINDI_INSTRUCTIONS,
                greeting: HINDI_GREETING,
            }
        } else {
            Self {
                instructions: ENGLISH_INSTRUCTIONS,
                greeting: ENGLISH_GREETING,
            }
        }
    }
}
