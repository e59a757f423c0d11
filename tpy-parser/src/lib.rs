//! Lexer and expression parser for the tpy Python front end
//!
//! - Indentation-aware lexer producing one token per call
//! - Operator recognition through a `logos` table
//! - Recursive descent expression parser allocating into a bump arena
//! - Recoverable errors go to `tpy_core::Diagnostics`; only malformed UTF-8
//!   and runaway nesting stop a parse

pub mod error;
pub mod keywords;
pub mod lexer;
pub mod parser;
pub mod threaded_parser;
pub mod token;

pub use error::{ErrorKind, ParseError};
pub use lexer::{LexResult, Lexer};
pub use parser::{ParseResult, Parsed, Parser};
pub use threaded_parser::{run_with_stack, ThreadedParserConfig};
pub use token::{Token, TokenKind};

use tpy_core::{Arena, Diagnostics, ExprRef, FrontendConfig, SourceFile};

/// Lex all of `file`, `End` included.
pub fn tokenize(file: &SourceFile, diagnostics: &mut Diagnostics, config: &FrontendConfig) -> LexResult<Vec<Token>> {
    Lexer::new(file, diagnostics).with_config(config).tokenize()
}

/// Parse `file` as a single expression into `arena`.
///
/// Returns `None` when no tree could be built; the reason is in
/// `diagnostics`.
pub fn parse_expression<'ast>(
    file: &SourceFile,
    diagnostics: &mut Diagnostics,
    arena: &'ast Arena,
    config: &FrontendConfig,
) -> ParseResult<Option<ExprRef<'ast>>> {
    let lexer = Lexer::new(file, diagnostics).with_config(config);
    let mut parser = Parser::new(lexer, arena)?.with_max_depth(config.max_depth);
    parser.parse_compilation_unit()
}
