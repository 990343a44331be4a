use thiserror::Error;

use crate::dictionary::DictionaryError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type InternalResult<T> = Result<T, Error>;

impl Error {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal(message.into())
    }
}
