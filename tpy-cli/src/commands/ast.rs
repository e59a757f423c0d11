//! `tpy ast`: parse one expression and print its tree

use anyhow::Result;
use std::io::Write;
use tpy_core::{Arena, Diagnostics, SourceFile};
use tpy_parser::{parse_expression, run_with_stack, ParseResult};
use tracing::debug;

use crate::config::Config;

/// Parse `file` on a thread with the configured stack and write the dump.
/// Nothing is written when no tree could be built.
pub fn write_ast(file: &SourceFile, config: &Config, diagnostics: &mut Diagnostics, out: &mut impl Write) -> Result<()> {
    let frontend = &config.frontend;
    let dump = run_with_stack(&config.parser.thread_config(), || -> ParseResult<Option<String>> {
        let arena = Arena::from_config(frontend);
        let expr = parse_expression(file, diagnostics, &arena, frontend)?;
        if let Some(expr) = expr {
            debug!("Parsed {} nodes into {} arena bytes", expr.node_count(), arena.allocated_bytes());
        }
        Ok(expr.map(|expr| expr.dump().to_string()))
    })??;

    if let Some(dump) = dump {
        write!(out, "{}", dump)?;
    }
    Ok(())
}
