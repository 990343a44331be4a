use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::{Error, InternalResult};

/// Settings for [`DictionaryLoader`](crate::dictionary::DictionaryLoader).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoaderConfig {
    /// Capacity of the token channel between parser and consumer.
    #[serde(default = "default_token_buffer_size")]
    pub token_buffer_size: usize,

    /// Replacement line pattern with three capture groups (text, frequency, pos).
    #[serde(default)]
    pub grammar_pattern: Option<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            token_buffer_size: default_token_buffer_size(),
            grammar_pattern: None,
        }
    }
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let file = File::open(path)
        .map_err(|e| Error::Internal(format!("Failed to open config file: {}", e)))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::Internal(format!("Failed to parse config file: {}", e)))?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> InternalResult<T> {
    let config = serde_json::from_str(s)
        .map_err(|e| Error::Internal(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

fn default_token_buffer_size() -> usize {
    1024
}
