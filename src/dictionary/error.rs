use std::{io, num::ParseFloatError, path::PathBuf};

use thiserror::Error;

/// Errors that end a dictionary load.
///
/// Every variant is terminal: a load never retries and never resumes after
/// one of these is produced. Tokens delivered before the error stay delivered.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The current directory could not be determined for a relative name.
    #[error("Failed to resolve dictionary path: {0}")]
    PathResolution(#[source] io::Error),

    #[error("Failed to open dictionary {path:?}: {source}")]
    ResourceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A captured frequency field is not a usable number.
    #[error("Error:{source}, line {line_number}({line})")]
    MalformedLine {
        line_number: usize,
        line: String,
        #[source]
        source: FrequencyError,
    },

    #[error("Failed to read dictionary at line {line_number}: {source}")]
    StreamRead {
        line_number: usize,
        #[source]
        source: io::Error,
    },

    #[error("Invalid line grammar: {0}")]
    InvalidGrammar(String),

    /// The parser task ended without reporting an outcome.
    #[error("Dictionary parser stopped without reporting an outcome")]
    ParserAborted,
}

impl DictionaryError {
    pub fn resource_open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DictionaryError::ResourceOpen {
            path: path.into(),
            source,
        }
    }

    /// Raw text of the line that ended the run, if the error is tied to one.
    pub fn line(&self) -> Option<&str> {
        match self {
            DictionaryError::MalformedLine { line, .. } => Some(line),
            _ => None,
        }
    }

    /// 1-based number of the line that ended the run.
    pub fn line_number(&self) -> Option<usize> {
        match self {
            DictionaryError::MalformedLine { line_number, .. }
            | DictionaryError::StreamRead { line_number, .. } => Some(*line_number),
            _ => None,
        }
    }
}

pub type DictionaryResult<T> = Result<T, DictionaryError>;

/// Why a frequency field was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FrequencyError {
    #[error(transparent)]
    Parse(#[from] ParseFloatError),

    /// The digits parsed but do not fit in a finite `f64`.
    #[error("frequency out of range")]
    OutOfRange,
}
