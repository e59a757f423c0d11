//! Error types for the tpy front end
//!
//! Only unrecoverable conditions live here. Lexical and syntax errors are
//! reported through [`crate::diagnostics::Diagnostics`] and never unwind.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed UTF-8 input at byte offset {offset}")]
    MalformedUtf8 { offset: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source registry overflow: maximum number of files reached")]
    FileIdOverflow,
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
