//! Dictionary loading facade.
//!
//! The facade resolves a dictionary name to a file, runs the streaming
//! parser over it and hands the token stream to a [`DictLoader`]. It
//! returns once the parser has reported its outcome.
//!
//! # Usage Example
//!
//! ```no_run
//! use segdict::dictionary::{load_dictionary, MemoryDictionary};
//!
//! # async fn example() -> Result<(), segdict::dictionary::DictionaryError> {
//! let mut dictionary = MemoryDictionary::new();
//! load_dictionary(&mut dictionary, "dict.txt").await?;
//! println!("{} entries", dictionary.len());
//! # Ok(())
//! # }
//! ```

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs::File, io::AsyncRead};
use tokio_stream::StreamExt;
use tracing::{debug, info};

use super::{
    error::{DictionaryError, DictionaryResult},
    grammar::LineGrammar,
    stream::{parse_stream, ParseSummary, TokenStream},
    token::Token,
};
use crate::config::LoaderConfig;

/// Something that can take dictionary tokens.
///
/// Implemented by whatever structure the surrounding system builds from a
/// dictionary (trie, hash map, ...). The facade only calls [`load`];
/// [`add_token`] is there for callers feeding tokens from other sources.
///
/// [`load`]: DictLoader::load
/// [`add_token`]: DictLoader::add_token
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DictLoader: Send {
    /// Consumes a token stream. Dropping the stream before it ends stops the
    /// parser feeding it.
    async fn load(&mut self, tokens: TokenStream) {
        let mut tokens = tokens;
        while let Some(token) = tokens.next().await {
            self.add_token(token);
        }
    }

    fn add_token(&mut self, token: Token);
}

/// Loads dictionaries with a fixed grammar and channel capacity.
#[derive(Debug, Clone)]
pub struct DictionaryLoader {
    grammar: LineGrammar,
    buffer_size: usize,
}

impl Default for DictionaryLoader {
    fn default() -> Self {
        Self {
            grammar: LineGrammar::new(),
            buffer_size: LoaderConfig::default().token_buffer_size,
        }
    }
}

impl DictionaryLoader {
    pub fn new(config: &LoaderConfig) -> DictionaryResult<Self> {
        let grammar = match &config.grammar_pattern {
            Some(pattern) => LineGrammar::with_pattern(pattern)?,
            None => LineGrammar::new(),
        };
        Ok(Self {
            grammar,
            buffer_size: config.token_buffer_size,
        })
    }

    pub fn grammar(&self) -> &LineGrammar {
        &self.grammar
    }

    /// Loads the dictionary named `name` into `loader`.
    ///
    /// The file is opened read-only and closed when the parser stops, on
    /// success and on failure alike.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn load<L>(
        &self,
        loader: &mut L,
        name: impl AsRef<Path>,
    ) -> DictionaryResult<ParseSummary>
    where
        L: DictLoader + ?Sized,
    {
        let path = dict_path(name)?;
        let file = File::open(&path)
            .await
            .map_err(|e| DictionaryError::resource_open(&path, e))?;
        debug!(path = %path.display(), "dictionary opened");

        let summary = self.load_from_reader(loader, file).await?;
        info!(
            path = %path.display(),
            lines = summary.lines_read,
            tokens = summary.tokens_sent,
            "dictionary loaded"
        );
        Ok(summary)
    }

    /// Runs the same pipeline as [`load`](Self::load) over an open reader.
    pub async fn load_from_reader<L, R>(
        &self,
        loader: &mut L,
        reader: R,
    ) -> DictionaryResult<ParseSummary>
    where
        L: DictLoader + ?Sized,
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tokens, outcome) = parse_stream(reader, self.grammar.clone(), self.buffer_size);
        loader.load(tokens).await;
        outcome.wait().await
    }
}

/// Loads `name` into `loader` with the default grammar.
pub async fn load_dictionary<L>(loader: &mut L, name: impl AsRef<Path>) -> DictionaryResult<ParseSummary>
where
    L: DictLoader + ?Sized,
{
    DictionaryLoader::default().load(loader, name).await
}

/// Resolves a dictionary name to an absolute path.
///
/// Absolute names are returned untouched. Relative names are joined onto the
/// current directory and cleaned.
pub fn dict_path(name: impl AsRef<Path>) -> DictionaryResult<PathBuf> {
    let name = name.as_ref();
    if name.is_absolute() {
        return Ok(name.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(DictionaryError::PathResolution)?;
    Ok(clean_path(&cwd.join(name)))
}

/// Lexically normalizes a path: drops `.` segments and redundant
/// separators, and folds `..` into the preceding segment. `..` never climbs
/// above the root.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}
