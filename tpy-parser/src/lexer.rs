//! Indentation-aware lexer for Python source
//!
//! The lexer produces one token per call into a caller-owned [`Token`] slot.
//! Indentation is measured at the start of every logical line and compared
//! against a stack of enclosing widths, yielding at most one `Indent` or
//! `Dedent` per call. Malformed input is reported to the diagnostics
//! collector and skipped or truncated; only undecodable UTF-8 stops the scan.

use crate::error::ParseError;
use crate::keywords;
use crate::token::{match_operator, Token, TokenKind};
use tpy_core::{unicode, Diagnostics, FrontendConfig, SourceFile, Span};
use tracing::trace;

pub type LexResult<T> = Result<T, ParseError>;

pub struct Lexer<'a> {
    file: &'a SourceFile,
    bytes: &'a [u8],
    pos: usize,
    end: usize,
    /// Enclosing indentation widths; the bottom entry is always 0.
    indents: Vec<usize>,
    /// Width and start of a line's indentation that still has levels to close.
    pending_indent: Option<(usize, usize)>,
    at_line_start: bool,
    accept_newlines: bool,
    tab_width: usize,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Lexer<'a> {
    pub fn new(file: &'a SourceFile, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            file,
            bytes: file.bytes(),
            pos: file.start(),
            end: file.end(),
            indents: vec![0],
            pending_indent: None,
            at_line_start: true,
            accept_newlines: true,
            tab_width: FrontendConfig::default().tab_width,
            diagnostics,
        }
    }

    pub fn with_config(mut self, config: &FrontendConfig) -> Self {
        self.tab_width = config.tab_width;
        self
    }

    pub fn file(&self) -> &'a SourceFile {
        self.file
    }

    /// Stop producing `Newline` tokens; line breaks are consumed silently.
    pub fn skip_newlines(&mut self) {
        self.accept_newlines = false;
    }

    pub fn allow_newlines(&mut self) {
        self.accept_newlines = true;
    }

    pub fn accepts_newlines(&self) -> bool {
        self.accept_newlines
    }

    /// Number of open indentation levels.
    pub fn indent_depth(&self) -> usize {
        self.indents.len() - 1
    }

    /// Report an error at `span` of the file being lexed.
    pub fn report(&mut self, span: Span, message: impl Into<String>) {
        self.diagnostics.report(self.file, span.local_pos, span.len, message);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Overwrite `tok` with the next token.
    pub fn next_token(&mut self, tok: &mut Token) -> LexResult<()> {
        *tok = self.lex()?;
        Ok(())
    }

    /// Lex the rest of the file, `End` included.
    pub fn tokenize(&mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut tok = Token::dummy();
        loop {
            self.next_token(&mut tok)?;
            tokens.push(tok);
            if tok.is(TokenKind::End) {
                return Ok(tokens);
            }
        }
    }

    fn lex(&mut self) -> LexResult<Token> {
        loop {
            if self.at_line_start {
                self.at_line_start = false;
                let start = self.pos;
                let width = self.measure_indentation();
                if !self.is_blank_line() {
                    self.pending_indent = Some((width, start));
                }
            }

            if let Some((width, start)) = self.pending_indent {
                if let Some(kind) = self.resolve_indentation(width) {
                    return Ok(self.token(kind, start, self.pos - start));
                }
            }

            self.skip_whitespace();
            let start = self.pos;
            if start >= self.end {
                return Ok(self.end_of_input());
            }

            match self.bytes[start] {
                // An embedded NUL that is not the end of input.
                0 => self.pos += 1,
                b'\n' => {
                    self.pos += 1;
                    if let Some(tok) = self.newline(start) {
                        return Ok(tok);
                    }
                }
                b'\r' => {
                    self.pos += if self.byte(1) == b'\n' { 2 } else { 1 };
                    if let Some(tok) = self.newline(start) {
                        return Ok(tok);
                    }
                }
                b'#' => self.skip_comment(),
                b'\\' => self.line_continuation(),
                b'0'..=b'9' => return Ok(self.lex_number(start)),
                b'.' if self.byte(1).is_ascii_digit() => return Ok(self.lex_fraction(start)),
                b'\'' | b'"' => return self.lex_string(start),
                b'!' if self.byte(1) != b'=' => {
                    self.error_at(start, 1, "invalid operator '!'. Did you mean 'not' instead?");
                    self.pos += 1;
                    return Ok(self.token(TokenKind::ErrorToken, start, 1));
                }
                b if b.is_ascii_alphabetic() || b == b'_' => {
                    if let Some(prefix_len) = self.string_prefix() {
                        self.pos += prefix_len;
                        return self.lex_string(start);
                    }
                    return self.lex_identifier(start);
                }
                b if b >= 0x80 => {
                    let (c, width) = self.decode()?;
                    if unicode::is_identifier_start(c) {
                        return self.lex_identifier(start);
                    }
                    self.invalid_character(c, width);
                }
                b => {
                    if let Some(tok) = self.lex_operator(start) {
                        return Ok(tok);
                    }
                    self.invalid_character(char::from(b), 1);
                }
            }
        }
    }

    // ===== Layout =====

    fn measure_indentation(&mut self) -> usize {
        let mut width = 0;
        loop {
            match self.byte(0) {
                b' ' => width += 1,
                b'\t' => width += self.tab_width,
                b'\x0C' => {}
                _ => return width,
            }
            self.pos += 1;
        }
    }

    /// Lines holding only whitespace or a comment take no part in indentation.
    fn is_blank_line(&self) -> bool {
        self.pos >= self.end || matches!(self.byte(0), b'#' | b'\n' | b'\r')
    }

    fn current_indent(&self) -> usize {
        self.indents.last().copied().unwrap_or(0)
    }

    /// Take one step toward `width`, returning the layout token to emit.
    fn resolve_indentation(&mut self, width: usize) -> Option<TokenKind> {
        let top = self.current_indent();
        if width > top {
            trace!("indent {} -> {}", top, width);
            self.indents.push(width);
            self.pending_indent = None;
            return Some(TokenKind::Indent);
        }

        if width < top {
            self.indents.pop();
            trace!("dedent {} -> {}", top, self.current_indent());
            // A width between two open levels closes to the outer one.
            if width > self.current_indent() {
                self.error_at(self.pos, 1, "unindent does not match any outer indentation level.");
                self.pending_indent = None;
            }
            return Some(TokenKind::Dedent);
        }

        self.pending_indent = None;
        None
    }

    fn end_of_input(&mut self) -> Token {
        if self.indents.len() > 1 {
            self.indents.pop();
            return self.token(TokenKind::Dedent, self.end, 0);
        }
        self.token(TokenKind::End, self.end, 0)
    }

    fn newline(&mut self, start: usize) -> Option<Token> {
        if !self.accept_newlines {
            return None;
        }
        self.at_line_start = true;
        Some(self.token(TokenKind::Newline, start, self.pos - start))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.byte(0), b' ' | b'\t' | b'\x0C') {
            self.pos += 1;
        }
    }

    fn skip_comment(&mut self) {
        while self.pos < self.end && !matches!(self.bytes[self.pos], b'\n' | b'\r') {
            self.pos += 1;
        }
    }

    /// A backslash joins the next physical line onto this one.
    fn line_continuation(&mut self) {
        match (self.byte(1), self.byte(2)) {
            (b'\r', b'\n') => self.pos += 3,
            (b'\n', _) | (b'\r', _) => self.pos += 2,
            _ => {
                self.error_at(self.pos, 1, "unexpected character after line continuation character.");
                self.pos += 1;
            }
        }
    }

    // ===== Numbers =====

    fn lex_number(&mut self, start: usize) -> Token {
        if self.byte(0) == b'0' {
            match self.byte(1) {
                b'x' | b'X' => {
                    return self.lex_prefixed_int(start, TokenKind::HexIntLiteral, is_hex_digit, "hexadecimal")
                }
                b'o' | b'O' => {
                    return self.lex_prefixed_int(start, TokenKind::OctalIntLiteral, is_octal_digit, "octal")
                }
                b'b' | b'B' => {
                    return self.lex_prefixed_int(start, TokenKind::BinaryIntLiteral, is_binary_digit, "binary")
                }
                _ => {}
            }
        }

        if let Some(cut) = self.scan_digits(is_decimal_digit) {
            return self.token(TokenKind::IntLiteral, start, cut - start);
        }

        match self.byte(0) {
            b'.' => return self.lex_fraction(start),
            b'e' | b'E' => return self.lex_exponent(start),
            _ => {}
        }

        let digits = &self.bytes[start..self.pos];
        if digits[0] == b'0' && digits.iter().any(|b| matches!(b, b'1'..=b'9')) {
            self.error_at(
                start,
                self.pos - start,
                "leading zeros in decimal integer literals are not permitted.",
            );
        }
        self.token(TokenKind::IntLiteral, start, self.pos - start)
    }

    fn lex_prefixed_int(&mut self, start: usize, kind: TokenKind, is_digit: fn(u8) -> bool, name: &str) -> Token {
        self.pos += 2;

        let first = self.byte(0);
        if first == b'_' && is_digit(self.byte(1)) {
            self.pos += 1;
        } else if !is_digit(first) {
            self.error_at(
                self.pos,
                1,
                format!("a {} prefix must be followed by a valid digit.", name),
            );
            // A stray separator goes with the truncated literal.
            if first == b'_' {
                self.pos += 1;
            }
            return self.token(kind, start, 2);
        }

        let end = self.scan_digits(is_digit).unwrap_or(self.pos);
        self.token(kind, start, end - start)
    }

    /// Scan from a `.` through the fraction and optional exponent.
    fn lex_fraction(&mut self, start: usize) -> Token {
        self.pos += 1;
        if !self.byte(0).is_ascii_digit() {
            self.error_at(self.pos, 1, "a floating point must be followed by a digit.");
            return self.token(TokenKind::FloatLiteral, start, self.pos - start);
        }

        if let Some(cut) = self.scan_digits(is_decimal_digit) {
            return self.token(TokenKind::FloatLiteral, start, cut - start);
        }

        if matches!(self.byte(0), b'e' | b'E') {
            return self.lex_exponent(start);
        }
        self.token(TokenKind::FloatLiteral, start, self.pos - start)
    }

    fn lex_exponent(&mut self, start: usize) -> Token {
        self.pos += 1;
        if matches!(self.byte(0), b'+' | b'-') {
            self.pos += 1;
        }

        if !self.byte(0).is_ascii_digit() {
            self.error_at(self.pos, 1, "a floating point must be followed by a digit.");
            return self.token(TokenKind::FloatLiteral, start, self.pos - start);
        }

        let end = self.scan_digits(is_decimal_digit).unwrap_or(self.pos);
        self.token(TokenKind::FloatLiteral, start, end - start)
    }

    /// Consume digits and `_` separators.
    ///
    /// A separator must be followed by a digit. A stray one is reported and
    /// consumed, and its position is returned so the literal can be cut
    /// just before it.
    fn scan_digits(&mut self, is_digit: fn(u8) -> bool) -> Option<usize> {
        loop {
            let b = self.byte(0);
            if is_digit(b) {
                self.pos += 1;
            } else if b == b'_' {
                if !is_digit(self.byte(1)) {
                    let cut = self.pos;
                    self.error_at(cut, 1, "a numeric separator must be followed by a valid digit.");
                    self.pos += 1;
                    return Some(cut);
                }
                self.pos += 2;
            } else {
                return None;
            }
        }
    }

    // ===== Strings =====

    /// Length of a string prefix (`r`, `b`, `u`, `f`, `rb`, `br`, `fr`, `rf`
    /// in any case) directly followed by a quote.
    fn string_prefix(&self) -> Option<usize> {
        let is_quote = |b: u8| b == b'\'' || b == b'"';
        let first = self.byte(0).to_ascii_lowercase();
        let second = self.byte(1).to_ascii_lowercase();
        match (first, second) {
            (b'r' | b'b' | b'u' | b'f', q) if is_quote(q) => Some(1),
            (b'r', b'b' | b'f') | (b'b' | b'f', b'r') if is_quote(self.byte(2)) => Some(2),
            _ => None,
        }
    }

    /// Scan a string whose opening quote is at the current position. `start`
    /// includes any prefix.
    fn lex_string(&mut self, start: usize) -> LexResult<Token> {
        let quote = self.byte(0);
        let kind = if quote == b'"' {
            TokenKind::DoubleQuotedStringLiteral
        } else {
            TokenKind::SingleQuotedStringLiteral
        };
        let triple = self.byte(1) == quote && self.byte(2) == quote;
        self.pos += if triple { 3 } else { 1 };

        loop {
            if self.pos >= self.end {
                self.error_at(start, self.pos - start, "unterminated string literal.");
                return Ok(self.token(kind, start, self.pos - start));
            }

            match self.bytes[self.pos] {
                b'\\' => {
                    self.pos += 1;
                    if self.pos >= self.end {
                        continue;
                    }
                    // Escapes are skipped here, not interpreted.
                    match self.bytes[self.pos] {
                        b'\r' if self.byte(1) == b'\n' => self.pos += 2,
                        b if b < 0x80 => self.pos += 1,
                        _ => self.pos += self.decode()?.1,
                    }
                }
                b'\n' | b'\r' if !triple => {
                    self.error_at(start, self.pos - start, "unterminated string literal.");
                    return Ok(self.token(kind, start, self.pos - start));
                }
                b if b == quote => {
                    if !triple {
                        self.pos += 1;
                        return Ok(self.token(kind, start, self.pos - start));
                    }
                    if self.byte(1) == quote && self.byte(2) == quote {
                        self.pos += 3;
                        return Ok(self.token(kind, start, self.pos - start));
                    }
                    self.pos += 1;
                }
                b if b >= 0x80 => self.pos += self.decode()?.1,
                _ => self.pos += 1,
            }
        }
    }

    // ===== Identifiers and operators =====

    fn lex_identifier(&mut self, start: usize) -> LexResult<Token> {
        loop {
            let b = self.byte(0);
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.pos += 1;
            } else if b >= 0x80 {
                let (c, width) = self.decode()?;
                if !unicode::is_identifier_continue(c) {
                    break;
                }
                self.pos += width;
            } else {
                break;
            }
        }

        let kind = keywords::lookup(&self.bytes[start..self.pos]).unwrap_or(TokenKind::Identifier);
        Ok(self.token(kind, start, self.pos - start))
    }

    fn lex_operator(&mut self, start: usize) -> Option<Token> {
        let window_len = self.bytes[start..self.end]
            .iter()
            .take(3)
            .take_while(|b| b.is_ascii())
            .count();
        let window = std::str::from_utf8(&self.bytes[start..start + window_len]).ok()?;
        let (kind, len) = match_operator(window)?;
        self.pos += len;
        Some(self.token(kind, start, len))
    }

    fn invalid_character(&mut self, c: char, width: usize) {
        self.error_at(
            self.pos,
            width,
            format!("invalid character '{}' (U+{:04X}).", c.escape_debug(), c as u32),
        );
        self.pos += width;
    }

    // ===== Helpers =====

    /// Byte at `offset` past the scan position; NUL at and past the end.
    #[inline]
    fn byte(&self, offset: usize) -> u8 {
        self.file.byte_at(self.pos + offset)
    }

    fn decode(&self) -> LexResult<(char, usize)> {
        Ok(unicode::decode_utf8(self.bytes, self.pos)?)
    }

    fn token(&self, kind: TokenKind, start: usize, len: usize) -> Token {
        Token::new(kind, self.file.span(start, len))
    }

    fn error_at(&mut self, pos: usize, len: usize, message: impl Into<String>) {
        self.diagnostics.report(self.file, pos, len, message);
    }
}

fn is_decimal_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

fn is_octal_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

fn is_binary_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1')
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;
