//! Token model
//!
//! Punctuation and operators carry `logos` patterns; the lexer runs that
//! table over a short ASCII window to get longest-match recognition. Every
//! other kind is produced by the hand-written scanners in [`crate::lexer`].

use logos::Logos;
use std::fmt;
use tpy_core::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Dummy,
    End,
    Newline,
    Indent,
    Dedent,

    // Delimiters
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(":=")]
    ColonEquals,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftSquare,
    #[token("]")]
    RightSquare,
    #[token("{")]
    LeftCurly,
    #[token("}")]
    RightCurly,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("@")]
    At,
    #[token("=")]
    Equals,
    #[token("->")]
    Arrow,

    // Compound assignment
    #[token("+=")]
    PlusEquals,
    #[token("-=")]
    MinusEquals,
    #[token("*=")]
    AsteriskEquals,
    #[token("/=")]
    SlashEquals,
    #[token("//=")]
    SlashSlashEquals,
    #[token("%=")]
    PercentEquals,
    #[token("@=")]
    AtEquals,
    #[token("&=")]
    AmpersandEquals,
    #[token("|=")]
    BarEquals,
    #[token("^=")]
    CaretEquals,
    #[token(">>=")]
    GreaterGreaterEquals,
    #[token("<<=")]
    LessLessEquals,
    #[token("**=")]
    AsteriskAsteriskEquals,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("**")]
    AsteriskAsterisk,
    #[token("/")]
    Slash,
    #[token("//")]
    SlashSlash,
    #[token("%")]
    Percent,
    #[token("<<")]
    LessLess,
    #[token(">>")]
    GreaterGreater,
    #[token("&")]
    Ampersand,
    #[token("|")]
    Bar,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilda,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEquals,
    #[token(">=")]
    GreaterEquals,
    #[token("==")]
    EqualsEquals,
    #[token("!=")]
    ExclamationEquals,

    // Literals
    IntLiteral,
    FloatLiteral,
    HexIntLiteral,
    BinaryIntLiteral,
    OctalIntLiteral,
    DoubleQuotedStringLiteral,
    SingleQuotedStringLiteral,

    // Keywords
    KeywordFalse,
    KeywordNone,
    KeywordTrue,
    KeywordAnd,
    KeywordAs,
    KeywordAssert,
    KeywordAsync,
    KeywordAwait,
    KeywordBreak,
    KeywordClass,
    KeywordContinue,
    KeywordDef,
    KeywordDel,
    KeywordElif,
    KeywordElse,
    KeywordExcept,
    KeywordFinally,
    KeywordFor,
    KeywordFrom,
    KeywordGlobal,
    KeywordIf,
    KeywordImport,
    KeywordIn,
    KeywordIs,
    KeywordLambda,
    KeywordNonlocal,
    KeywordNot,
    KeywordOr,
    KeywordPass,
    KeywordRaise,
    KeywordReturn,
    KeywordTry,
    KeywordWhile,
    KeywordWith,
    KeywordYield,

    Identifier,

    // Two-word operators, formed by the parser
    NotInOp,
    IsNotOp,

    /// Stands in for input the lexer could not classify.
    ErrorToken,
}

impl TokenKind {
    pub fn is_string_literal(self) -> bool {
        matches!(
            self,
            TokenKind::DoubleQuotedStringLiteral | TokenKind::SingleQuotedStringLiteral
        )
    }

    /// Integer literal kinds and their radix.
    pub fn int_radix(self) -> Option<u32> {
        match self {
            TokenKind::IntLiteral => Some(10),
            TokenKind::HexIntLiteral => Some(16),
            TokenKind::OctalIntLiteral => Some(8),
            TokenKind::BinaryIntLiteral => Some(2),
            _ => None,
        }
    }

    pub fn is_keyword(self) -> bool {
        (TokenKind::KeywordFalse as u8..=TokenKind::KeywordYield as u8).contains(&(self as u8))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A slot the lexer overwrites on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn dummy() -> Self {
        Self::new(TokenKind::Dummy, Span::empty())
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::dummy()
    }
}

/// Recognize the longest operator or delimiter at the start of `window`.
///
/// Returns the kind and its length in bytes.
pub fn match_operator(window: &str) -> Option<(TokenKind, usize)> {
    let mut lex = TokenKind::lexer(window);
    match lex.next() {
        Some(Ok(kind)) => Some((kind, lex.span().end)),
        _ => None,
    }
}
