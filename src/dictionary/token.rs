use serde::{Deserialize, Serialize};

/// A single dictionary entry.
///
/// `pos` is only ever filled when the source line carried an explicit
/// frequency.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    #[serde(default)]
    pub frequency: f64,
    #[serde(default)]
    pub pos: String,
}

impl Token {
    pub fn new(text: impl Into<String>, frequency: f64, pos: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            frequency,
            pos: pos.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn pos(&self) -> &str {
        &self.pos
    }
}
