//! A single registered source file and its line map

use super::buffer::ByteBuffer;
use crate::span::Span;
use crate::unicode;
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

/// One line terminator: `\n` and a lone `\r` have length 1, `\r\n` has 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewlineRecord {
    pub pos: usize,
    pub len: usize,
}

/// 1-based line and column of a position. Columns count codepoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation<'a> {
    pub path: &'a Path,
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for SourceLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.col)
    }
}

#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
    offset: usize,
    buffer: ByteBuffer,
    line_map: Vec<NewlineRecord>,
}

impl SourceFile {
    /// Wrap `buffer` and index its line terminators. `offset` is the file's
    /// base in the registry address space.
    pub fn new(path: impl Into<PathBuf>, offset: usize, buffer: ByteBuffer) -> Self {
        let line_map = scan_line_terminators(buffer.as_bytes());
        Self {
            path: path.into(),
            offset,
            buffer,
            line_map,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Raw size in bytes, BOM included.
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Local offset where lexing starts (past the BOM).
    pub fn start(&self) -> usize {
        self.buffer.content_start()
    }

    /// Local offset one past the last content byte.
    pub fn end(&self) -> usize {
        self.buffer.len()
    }

    pub fn has_bom(&self) -> bool {
        self.buffer.has_bom()
    }

    pub fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    pub fn bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    #[inline]
    pub fn byte_at(&self, pos: usize) -> u8 {
        self.buffer.byte_at(pos)
    }

    /// Source text under `span`, replacing invalid UTF-8.
    pub fn text(&self, span: Span) -> Cow<'_, str> {
        let bytes = self.bytes();
        let start = span.local_pos.min(bytes.len());
        let end = span.local_end().min(bytes.len());
        String::from_utf8_lossy(&bytes[start..end])
    }

    /// Build a span for a local range of this file.
    pub fn span(&self, local_pos: usize, len: usize) -> Span {
        Span::new(local_pos, local_pos + self.offset, len)
    }

    pub fn line_map(&self) -> &[NewlineRecord] {
        &self.line_map
    }

    pub fn line_count(&self) -> usize {
        self.line_map.len() + 1
    }

    pub fn location(&self, local_pos: usize) -> SourceLocation<'_> {
        let line = self.line_no(local_pos);
        let col = self.col_no(local_pos, line);
        SourceLocation {
            path: &self.path,
            line,
            col,
        }
    }

    /// Line containing `local_pos`: one more than the number of terminators
    /// that end strictly before it.
    pub fn line_no(&self, local_pos: usize) -> usize {
        if self.line_map.is_empty() {
            return 1;
        }
        self.line_map.partition_point(|record| record.pos < local_pos) + 1
    }

    /// Column of `local_pos` on `line_no`, counted in codepoints.
    pub fn col_no(&self, local_pos: usize, line_no: usize) -> usize {
        let line_start = match line_no {
            0 | 1 => self.start(),
            _ => match self.line_map.get(line_no - 2) {
                Some(record) => record.pos + record.len,
                None => self.start(),
            },
        };

        let bytes = self.bytes();
        let target = local_pos.min(bytes.len());
        let mut cursor = line_start;
        let mut col = 1;
        while cursor < target {
            cursor += unicode::width_lossy(bytes, cursor);
            col += 1;
        }
        col
    }
}

fn scan_line_terminators(bytes: &[u8]) -> Vec<NewlineRecord> {
    let mut records = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\n' => {
                records.push(NewlineRecord { pos, len: 1 });
                pos += 1;
            }
            b'\r' if bytes.get(pos + 1) == Some(&b'\n') => {
                records.push(NewlineRecord { pos, len: 2 });
                pos += 2;
            }
            b'\r' => {
                records.push(NewlineRecord { pos, len: 1 });
                pos += 1;
            }
            _ => pos += 1,
        }
    }
    records
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
