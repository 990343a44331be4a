//! # segdict: streaming word-frequency dictionaries
//!
//! segdict reads word-frequency dictionaries (one `text [frequency [pos]]`
//! entry per line) and streams the parsed entries into whatever structure a
//! segmenter or tokenizer builds from them.
//!
//! ## Pipeline
//!
//! ```text
//! Name → Path Resolution → Streaming Parser → Line Grammar → DictLoader
//! ```
//!
//! - Line grammar ([`dictionary::grammar`]): one raw line to one token, or a skip
//! - Streaming parser ([`dictionary::stream`]): a background task feeding a
//!   bounded token channel and resolving a single outcome
//! - Loader facade ([`dictionary::loader`]): resolves the name, owns the file,
//!   drives the consumer and returns the outcome
//!
//! Loader settings live in [`config`], errors in [`error`] and
//! [`dictionary::error`].

pub mod config;
pub mod dictionary;
pub mod error;

// Re-exports
pub use dictionary::{DictLoader, DictionaryError, MemoryDictionary, Token};
pub use error::*;
