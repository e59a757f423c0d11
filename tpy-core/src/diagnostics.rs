//! Collection of recoverable lexical and syntax errors
//!
//! A [`Diagnostics`] value is owned by whoever drives a compilation and
//! borrowed by the lexer. Reporting never interrupts scanning; the driver
//! checks [`Diagnostics::has_errors`] after each phase.

use crate::source::SourceFile;
use crate::span::Span;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub path: PathBuf,
    pub span: Span,
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error: {}\n --> {} at line {}, col {}\n\n",
            self.message,
            self.path.display(),
            self.line,
            self.col
        )
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    reported: Vec<Diagnostic>,
    echo: bool,
}

impl Diagnostics {
    /// A collector that only buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// A collector that also writes each diagnostic to stderr as it arrives.
    pub fn to_stderr() -> Self {
        Self {
            reported: Vec::new(),
            echo: true,
        }
    }

    /// Record an error covering `len` bytes at `local_pos` in `file`.
    pub fn report(&mut self, file: &SourceFile, local_pos: usize, len: usize, message: impl Into<String>) {
        let location = file.location(local_pos);
        let diagnostic = Diagnostic {
            message: message.into(),
            path: location.path.to_path_buf(),
            span: file.span(local_pos, len),
            line: location.line,
            col: location.col,
        };
        if self.echo {
            eprint!("{}", diagnostic);
        }
        self.reported.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.reported.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.reported.iter()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.reported.iter().map(|d| d.message.as_str()).collect()
    }

    /// Drain everything reported so far.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.reported)
    }
}
