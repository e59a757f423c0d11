//! `tpy tokens`: dump the token stream of each file

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use tpy_core::{Diagnostic, Diagnostics, FileId, SourceRegistry};
use tpy_parser::{tokenize, TokenKind};

use crate::config::Config;

#[derive(Debug, Serialize)]
struct TokenRecord {
    kind: String,
    start: usize,
    end: usize,
    line: usize,
    col: usize,
    text: String,
}

#[derive(Debug, Serialize)]
struct FileTokens {
    path: String,
    tokens: Vec<TokenRecord>,
    /// Errors reported while lexing this file.
    diagnostics: Vec<Diagnostic>,
}

pub fn write_tokens(
    registry: &SourceRegistry,
    files: &[FileId],
    json: bool,
    config: &Config,
    diagnostics: &mut Diagnostics,
    out: &mut impl Write,
) -> Result<()> {
    let mut listing = Vec::with_capacity(files.len());
    for &id in files {
        let file = &registry[id];
        let reported_before = diagnostics.len();
        let tokens = tokenize(file, diagnostics, &config.frontend)?;
        let records = tokens
            .iter()
            .map(|tok| {
                let location = file.location(tok.span.local_pos);
                TokenRecord {
                    kind: tok.kind.to_string(),
                    start: tok.span.local_pos,
                    end: tok.span.local_end(),
                    line: location.line,
                    col: location.col,
                    text: match tok.kind {
                        TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent | TokenKind::End => String::new(),
                        _ => file.text(tok.span).into_owned(),
                    },
                }
            })
            .collect();
        listing.push(FileTokens {
            path: file.path().display().to_string(),
            tokens: records,
            diagnostics: diagnostics.iter().skip(reported_before).cloned().collect(),
        });
    }

    if json {
        serde_json::to_writer_pretty(&mut *out, &listing)?;
        writeln!(out)?;
        return Ok(());
    }

    let many = listing.len() > 1;
    for entry in &listing {
        if many {
            writeln!(out, "==> {} <==", entry.path)?;
        }
        for tok in &entry.tokens {
            writeln!(out, "{} {}..{} {:?}", tok.kind, tok.start, tok.end, tok.text)?;
        }
    }
    Ok(())
}
