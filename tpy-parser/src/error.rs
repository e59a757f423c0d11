//! Parser error types
//!
//! These are the conditions that stop lexing or parsing outright. Everything
//! recoverable is reported through `tpy_core::Diagnostics` instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed UTF-8 sequence at byte {position}")]
    MalformedUtf8 { position: usize },

    #[error("Maximum parsing depth exceeded: depth {depth} exceeds limit of {max_depth}")]
    MaxDepthExceeded { depth: usize, max_depth: usize },

    #[error("Parser thread failed: {0}")]
    Thread(String),

    #[error(transparent)]
    Core(tpy_core::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedUtf8,
    MaxDepthExceeded,
    Thread,
    Core,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::MalformedUtf8 { .. } => ErrorKind::MalformedUtf8,
            ParseError::MaxDepthExceeded { .. } => ErrorKind::MaxDepthExceeded,
            ParseError::Thread(_) => ErrorKind::Thread,
            ParseError::Core(_) => ErrorKind::Core,
        }
    }
}

impl From<tpy_core::Error> for ParseError {
    fn from(err: tpy_core::Error) -> Self {
        match err {
            tpy_core::Error::MalformedUtf8 { offset } => ParseError::MalformedUtf8 { position: offset },
            other => ParseError::Core(other),
        }
    }
}
