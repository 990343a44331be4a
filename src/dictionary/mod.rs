//! Word-frequency dictionary loading.
//!
//! ```text
//! name ─→ dict_path ─→ File ─→ parse_stream ──tokens──→ DictLoader::load
//!                                   │
//!                                   └──outcome──→ caller
//! ```
//!
//! - [`grammar`]: one line to one [`Token`]
//! - [`stream`]: background line parser with a token channel and an outcome slot
//! - [`loader`]: path resolution, the [`DictLoader`] capability and the facade
//! - [`memory`]: an in-memory [`DictLoader`]

pub mod error;
pub mod grammar;
pub mod loader;
pub mod memory;
pub mod stream;
pub mod token;

pub use error::{DictionaryError, DictionaryResult, FrequencyError};
pub use grammar::{LineGrammar, DEFAULT_LINE_PATTERN};
pub use loader::{clean_path, dict_path, load_dictionary, DictLoader, DictionaryLoader};
pub use memory::MemoryDictionary;
pub use stream::{parse_stream, ParseOutcome, ParseSummary, ParserState, TokenStream};
pub use token::Token;
