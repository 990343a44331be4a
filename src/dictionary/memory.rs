use std::collections::HashMap;

use super::{loader::DictLoader, token::Token};

/// Reference [`DictLoader`] keeping every token in memory.
///
/// Tokens are kept in arrival order. Lookups by text see the most recent
/// token with that text.
#[derive(Debug, Clone, Default)]
pub struct MemoryDictionary {
    tokens: Vec<Token>,
    index: HashMap<String, usize>,
    total_frequency: f64,
}

impl MemoryDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, text: &str) -> Option<&Token> {
        self.index.get(text).map(|&i| &self.tokens[i])
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Sum of the frequencies of every token received.
    pub fn total_frequency(&self) -> f64 {
        self.total_frequency
    }
}

impl DictLoader for MemoryDictionary {
    fn add_token(&mut self, token: Token) {
        self.total_frequency += token.frequency;
        self.index.insert(token.text.clone(), self.tokens.len());
        self.tokens.push(token);
    }
}
