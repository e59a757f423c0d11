//! Core data structures for the tpy Python front end
//!
//! This crate holds everything the lexer and parser share: spans, source
//! files and the multi-file registry, UTF-8 decoding, diagnostics, front-end
//! configuration and the arena-allocated expression AST.

pub mod arena;
pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod source;
pub mod span;
pub mod unicode;

pub use arena::Arena;
pub use ast::{BinaryOp, Expr, ExprDump, ExprKind, ExprRef, UnaryOp};
pub use config::FrontendConfig;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{Error, Result};
pub use source::{ByteBuffer, FileId, NewlineRecord, SourceFile, SourceLocation, SourceRegistry};
pub use span::Span;
