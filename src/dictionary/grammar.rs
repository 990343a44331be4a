use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use super::{
    error::{DictionaryError, DictionaryResult, FrequencyError},
    token::Token,
};

/// Anchored `text (freq (pos)?)?` shape. `text` is non-greedy so the
/// optional suffix groups claim as much of the line as they can.
pub const DEFAULT_LINE_PATTERN: &str = r"^(.+?)(?: +([0-9]+))?(?: +([a-z]+))?$";

const BYTE_ORDER_MARK: char = '\u{feff}';

lazy_static! {
    static ref DEFAULT_LINE_REGEX: Regex =
        Regex::new(DEFAULT_LINE_PATTERN).expect("default line pattern is valid");
}

/// Maps one raw dictionary line to a [`Token`].
#[derive(Debug, Clone)]
pub struct LineGrammar {
    pattern: Regex,
}

impl Default for LineGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl LineGrammar {
    pub fn new() -> Self {
        Self {
            pattern: DEFAULT_LINE_REGEX.clone(),
        }
    }

    /// Builds a grammar from a custom pattern.
    ///
    /// The pattern must expose exactly three capture groups, in order:
    /// text, frequency and part of speech.
    pub fn with_pattern(pattern: &str) -> DictionaryResult<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| DictionaryError::InvalidGrammar(e.to_string()))?;
        // captures_len counts the implicit whole-match group
        if pattern.captures_len() != 4 {
            return Err(DictionaryError::InvalidGrammar(format!(
                "expected 3 capture groups (text, frequency, pos), found {}",
                pattern.captures_len() - 1
            )));
        }
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Parses a single line.
    ///
    /// Returns `Ok(None)` for lines that should be skipped: blank lines and
    /// lines that do not fit the pattern. The only error is a captured
    /// frequency that is not a finite number.
    pub fn parse_line(&self, line_number: usize, line: &str) -> DictionaryResult<Option<Token>> {
        let Some(fields) = self.pattern.captures(line.trim()) else {
            trace!(line_number, "skipping line");
            return Ok(None);
        };

        let text = fields
            .get(1)
            .map_or("", |m| m.as_str())
            .replacen(BYTE_ORDER_MARK, "", 1);
        let mut token = Token {
            text: text.trim().to_string(),
            ..Default::default()
        };

        if let Some(frequency) = non_empty_field(&fields, 2) {
            token.frequency =
                parse_frequency(frequency).map_err(|source| DictionaryError::MalformedLine {
                    line_number,
                    line: line.to_string(),
                    source,
                })?;
            if let Some(pos) = non_empty_field(&fields, 3) {
                token.pos = pos.to_string();
            }
        }

        // a lone byte-order mark leaves nothing to index
        if token.text.is_empty() {
            trace!(line_number, "skipping line with empty text");
            return Ok(None);
        }
        Ok(Some(token))
    }
}

fn parse_frequency(field: &str) -> Result<f64, FrequencyError> {
    let frequency = field.parse::<f64>()?;
    // `parse` saturates overlong digit runs to infinity
    if !frequency.is_finite() {
        return Err(FrequencyError::OutOfRange);
    }
    Ok(frequency)
}

fn non_empty_field<'h>(fields: &regex::Captures<'h>, index: usize) -> Option<&'h str> {
    fields
        .get(index)
        .map(|m| m.as_str().trim())
        .filter(|field| !field.is_empty())
}
