//! Recursive descent parser for Python expressions
//!
//! One method per precedence level, lowest binding first:
//!
//! ```text
//! named      NAME ':=' ternary | ternary
//! ternary    binary ['if' binary 'else' ternary]
//! binary     operand (binary_op operand)*
//! operand    'not' operand | unary
//! unary      ('+' | '-' | '~') unary | power
//! power      primary ['**' unary]
//! primary    atom ('.' NAME | '(' args ')' | '[' subscript ']')*
//! ```
//!
//! `binary` climbs precedence over, from loosest: `or`, `and`, prefix `not`,
//! comparisons, `|`, `^`, `&`, shifts, `+ -`, then `* / // % @`. All binary
//! operators group to the left.
//!
//! Every method returns a [`Parsed`]: a node, `Failed` when an error has
//! already been reported for this expression, or `Absent` when nothing that
//! could start the production was found and the caller picks the message.

use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use tpy_core::{Arena, BinaryOp, ExprKind, ExprRef, Span, UnaryOp};
use tracing::trace;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed<'ast> {
    Node(ExprRef<'ast>),
    /// An error was reported; callers must not report another.
    Failed,
    /// No expression here and nothing reported yet.
    Absent,
}

impl<'ast> Parsed<'ast> {
    pub fn node(self) -> Option<ExprRef<'ast>> {
        match self {
            Parsed::Node(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Parsed::Failed)
    }
}

const OR_PREC: u8 = 1;
const AND_PREC: u8 = 2;
const NOT_PREC: u8 = 3;
const COMPARISON_PREC: u8 = 4;

/// Binding power of each binary operator token.
fn binary_op(kind: TokenKind) -> Option<(BinaryOp, u8)> {
    let op = match kind {
        TokenKind::KeywordOr => (BinaryOp::Or, OR_PREC),
        TokenKind::KeywordAnd => (BinaryOp::And, AND_PREC),
        TokenKind::Less => (BinaryOp::Less, COMPARISON_PREC),
        TokenKind::LessEquals => (BinaryOp::LessEqual, COMPARISON_PREC),
        TokenKind::Greater => (BinaryOp::Greater, COMPARISON_PREC),
        TokenKind::GreaterEquals => (BinaryOp::GreaterEqual, COMPARISON_PREC),
        TokenKind::EqualsEquals => (BinaryOp::Equal, COMPARISON_PREC),
        TokenKind::ExclamationEquals => (BinaryOp::NotEqual, COMPARISON_PREC),
        TokenKind::KeywordIn => (BinaryOp::In, COMPARISON_PREC),
        TokenKind::NotInOp => (BinaryOp::NotIn, COMPARISON_PREC),
        TokenKind::KeywordIs => (BinaryOp::Is, COMPARISON_PREC),
        TokenKind::IsNotOp => (BinaryOp::IsNot, COMPARISON_PREC),
        TokenKind::Bar => (BinaryOp::BitOr, 5),
        TokenKind::Caret => (BinaryOp::BitXor, 6),
        TokenKind::Ampersand => (BinaryOp::BitAnd, 7),
        TokenKind::LessLess => (BinaryOp::LeftShift, 8),
        TokenKind::GreaterGreater => (BinaryOp::RightShift, 8),
        TokenKind::Plus => (BinaryOp::Add, 9),
        TokenKind::Minus => (BinaryOp::Sub, 9),
        TokenKind::Asterisk => (BinaryOp::Mul, 10),
        TokenKind::Slash => (BinaryOp::Div, 10),
        TokenKind::SlashSlash => (BinaryOp::FloorDiv, 10),
        TokenKind::Percent => (BinaryOp::Mod, 10),
        TokenKind::At => (BinaryOp::MatMul, 10),
        _ => return None,
    };
    Some(op)
}

pub struct Parser<'a, 'ast> {
    lexer: Lexer<'a>,
    arena: &'ast Arena,
    /// Current token.
    tok: Token,
    /// A token lexed ahead of `tok` and not yet consumed.
    pushback: Option<Token>,
    /// Open brackets; newlines are suppressed while this is non-zero.
    bracket_depth: usize,
    /// Current parsing depth to prevent stack overflow
    depth: usize,
    max_depth: usize,
}

impl<'a, 'ast> Parser<'a, 'ast> {
    /// Default maximum parsing depth
    pub const DEFAULT_MAX_DEPTH: usize = 200;

    /// Create a parser and read the first token.
    pub fn new(lexer: Lexer<'a>, arena: &'ast Arena) -> ParseResult<Self> {
        let mut parser = Self {
            lexer,
            arena,
            tok: Token::dummy(),
            pushback: None,
            bracket_depth: 0,
            depth: 0,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        };
        parser.advance()?;
        Ok(parser)
    }

    /// Set the maximum parsing depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The token the parser is positioned on.
    pub fn current(&self) -> Token {
        self.tok
    }

    pub fn lexer(&self) -> &Lexer<'a> {
        &self.lexer
    }

    /// Parse a whole input holding a single expression.
    ///
    /// Reports a missing expression or anything other than line breaks
    /// between the expression and the end of input. Returns the tree when
    /// one was built, even if trailing input was reported.
    pub fn parse_compilation_unit(&mut self) -> ParseResult<Option<ExprRef<'ast>>> {
        self.skip_newline_tokens()?;

        let start = self.tok.span;
        let parsed = self.parse_expression()?;
        let Some(expr) = self.require(parsed, start, "expected expression.") else {
            return Ok(None);
        };

        self.skip_newline_tokens()?;
        if !self.expect(TokenKind::End) {
            let span = self.tok.span;
            self.report(span, "unexpected token after expression.");
        }
        Ok(Some(expr))
    }

    pub fn parse_expression(&mut self) -> ParseResult<Parsed<'ast>> {
        self.with_depth(|p| p.parse_named_expr())
    }

    // ===== Token Navigation =====

    fn advance(&mut self) -> ParseResult<()> {
        match self.pushback.take() {
            Some(tok) => self.tok = tok,
            None => self.lexer.next_token(&mut self.tok)?,
        }
        Ok(())
    }

    /// Kind of the token after the current one, lexing it into the pushback
    /// slot if needed.
    fn peek(&mut self) -> ParseResult<TokenKind> {
        if let Some(tok) = self.pushback {
            return Ok(tok.kind);
        }
        let mut tok = Token::dummy();
        self.lexer.next_token(&mut tok)?;
        self.pushback = Some(tok);
        Ok(tok.kind)
    }

    fn expect(&self, kind: TokenKind) -> bool {
        self.tok.is(kind)
    }

    /// Consume an opening bracket; line breaks stop being tokens until the
    /// matching close.
    fn open_bracket(&mut self) -> ParseResult<()> {
        self.bracket_depth += 1;
        self.lexer.skip_newlines();
        self.advance()
    }

    /// Consume a closing bracket. Newlines come back once the outermost
    /// bracket closes, before the following token is lexed.
    fn close_bracket(&mut self) -> ParseResult<()> {
        self.bracket_depth = self.bracket_depth.saturating_sub(1);
        if self.bracket_depth == 0 {
            self.lexer.allow_newlines();
        }
        self.advance()
    }

    fn skip_newline_tokens(&mut self) -> ParseResult<()> {
        while self.expect(TokenKind::Newline) {
            self.advance()?;
        }
        Ok(())
    }

    /// Replace `is not` and `not in` with their single-token forms. Returns
    /// true when a lone `not` was reported and read as `not in`.
    fn fold_two_word_operator(&mut self) -> ParseResult<bool> {
        match self.tok.kind {
            TokenKind::KeywordIs => {
                if self.peek()? == TokenKind::KeywordNot {
                    self.merge_with_pushback(TokenKind::IsNotOp);
                }
            }
            TokenKind::KeywordNot => {
                if self.peek()? == TokenKind::KeywordIn {
                    self.merge_with_pushback(TokenKind::NotInOp);
                } else {
                    let span = self.tok.span;
                    self.report(span, "expected 'in' after 'not'. Did you mean 'not in'?");
                    self.tok.kind = TokenKind::NotInOp;
                    return Ok(true);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn merge_with_pushback(&mut self, kind: TokenKind) {
        if let Some(second) = self.pushback.take() {
            self.tok = Token::new(kind, self.tok.span + second.span);
        }
    }

    // ===== Helpers =====

    /// Check and increment depth, returning error if max depth exceeded
    fn enter_recursion(&mut self) -> ParseResult<()> {
        if self.depth >= self.max_depth {
            return Err(ParseError::MaxDepthExceeded {
                depth: self.depth,
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Decrement depth when leaving a recursive call
    fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn with_depth(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<Parsed<'ast>>) -> ParseResult<Parsed<'ast>> {
        self.enter_recursion()?;
        let result = f(self);
        self.exit_recursion();
        result
    }

    fn report(&mut self, span: Span, message: &str) {
        self.lexer.report(span, message);
    }

    /// Unwrap a required sub-expression, reporting `message` at `at` if it is
    /// missing and nothing was reported for it yet.
    fn require(&mut self, parsed: Parsed<'ast>, at: Span, message: &str) -> Option<ExprRef<'ast>> {
        match parsed {
            Parsed::Node(expr) => Some(expr),
            Parsed::Failed => None,
            Parsed::Absent => {
                self.report(at, message);
                None
            }
        }
    }

    fn node(&self, kind: ExprKind<'ast>, span: Span) -> Parsed<'ast> {
        Parsed::Node(self.arena.alloc(kind, span))
    }

    /// A node for the current token alone, which is then consumed.
    fn leaf(&mut self, kind: ExprKind<'ast>) -> ParseResult<Parsed<'ast>> {
        let node = self.node(kind, self.tok.span);
        self.advance()?;
        Ok(node)
    }

    // ===== Expressions =====

    fn parse_named_expr(&mut self) -> ParseResult<Parsed<'ast>> {
        if !self.expect(TokenKind::Identifier) || self.peek()? != TokenKind::ColonEquals {
            return self.parse_ternary();
        }

        trace!("assignment expression at {}", self.tok.span);
        let target = self.arena.alloc(ExprKind::Name, self.tok.span);
        self.advance()?;
        self.advance()?;

        let value_start = self.tok.span;
        let parsed = self.with_depth(|p| p.parse_ternary())?;
        let Some(value) = self.require(parsed, value_start, "expected expression after ':='.") else {
            return Ok(Parsed::Failed);
        };
        Ok(self.node(ExprKind::NamedExpr { target, value }, target.span + value.span))
    }

    fn parse_ternary(&mut self) -> ParseResult<Parsed<'ast>> {
        let then = match self.parse_binary(OR_PREC)? {
            Parsed::Node(expr) => expr,
            other => return Ok(other),
        };
        if !self.expect(TokenKind::KeywordIf) {
            return Ok(Parsed::Node(then));
        }
        self.advance()?;

        let condition_start = self.tok.span;
        let parsed = self.parse_binary(OR_PREC)?;
        let Some(condition) = self.require(
            parsed,
            condition_start,
            "expected condition after 'if' in conditional expression.",
        ) else {
            return Ok(Parsed::Failed);
        };

        if !self.expect(TokenKind::KeywordElse) {
            let span = self.tok.span;
            self.report(span, "expected 'else' after condition in conditional expression.");
            return Ok(Parsed::Failed);
        }
        self.advance()?;

        let otherwise_start = self.tok.span;
        let parsed = self.with_depth(|p| p.parse_ternary())?;
        let Some(otherwise) = self.require(
            parsed,
            otherwise_start,
            "expected expression after 'else' in conditional expression.",
        ) else {
            return Ok(Parsed::Failed);
        };

        Ok(self.node(
            ExprKind::Ternary {
                then,
                condition,
                otherwise,
            },
            then.span + otherwise.span,
        ))
    }

    /// Binary operators from `or` up to the multiplicative level, by
    /// precedence climbing. Every operator folds to the left.
    fn parse_binary(&mut self, min_prec: u8) -> ParseResult<Parsed<'ast>> {
        let mut lhs = match self.parse_operand(min_prec)? {
            Parsed::Node(expr) => expr,
            other => return Ok(other),
        };

        loop {
            let healed = min_prec <= COMPARISON_PREC && self.fold_two_word_operator()?;
            let Some((op, prec)) = binary_op(self.tok.kind) else {
                break;
            };
            if prec < min_prec {
                break;
            }
            self.advance()?;

            let rhs_start = self.tok.span;
            let parsed = self.parse_binary(prec + 1)?;
            // A bare `not` was already reported; a missing operand is part
            // of the same mistake.
            if healed && matches!(parsed, Parsed::Absent) {
                return Ok(Parsed::Failed);
            }
            let message = format!("expected expression after '{}'.", op);
            let Some(rhs) = self.require(parsed, rhs_start, &message) else {
                return Ok(Parsed::Failed);
            };
            lhs = self.arena.alloc(ExprKind::Binary { op, lhs, rhs }, lhs.span + rhs.span);
        }
        Ok(Parsed::Node(lhs))
    }

    /// `not` is a prefix operator that binds looser than comparisons.
    fn parse_operand(&mut self, min_prec: u8) -> ParseResult<Parsed<'ast>> {
        if min_prec > NOT_PREC || !self.expect(TokenKind::KeywordNot) {
            return self.parse_unary();
        }
        let not_span = self.tok.span;
        self.advance()?;

        let operand_start = self.tok.span;
        let parsed = self.with_depth(|p| p.parse_binary(NOT_PREC))?;
        let Some(operand) = self.require(parsed, operand_start, "expected expression after 'not'.") else {
            return Ok(Parsed::Failed);
        };
        Ok(self.node(
            ExprKind::Unary {
                op: UnaryOp::Not,
                operand,
            },
            not_span + operand.span,
        ))
    }

    fn parse_unary(&mut self) -> ParseResult<Parsed<'ast>> {
        let op = match self.tok.kind {
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Minus,
            TokenKind::Tilda => UnaryOp::Invert,
            _ => return self.parse_power(),
        };
        let op_span = self.tok.span;
        self.advance()?;

        let operand_start = self.tok.span;
        let parsed = self.with_depth(|p| p.parse_unary())?;
        let message = format!("expected expression after unary '{}'.", op);
        let Some(operand) = self.require(parsed, operand_start, &message) else {
            return Ok(Parsed::Failed);
        };
        Ok(self.node(ExprKind::Unary { op, operand }, op_span + operand.span))
    }

    /// `**` binds tighter than a unary operator on its left and looser than
    /// one on its right, and groups to the right.
    fn parse_power(&mut self) -> ParseResult<Parsed<'ast>> {
        let base = match self.parse_primary()? {
            Parsed::Node(expr) => expr,
            other => return Ok(other),
        };
        if !self.expect(TokenKind::AsteriskAsterisk) {
            return Ok(Parsed::Node(base));
        }
        self.advance()?;

        let exponent_start = self.tok.span;
        let parsed = self.with_depth(|p| p.parse_unary())?;
        let Some(exponent) = self.require(parsed, exponent_start, "expected expression after '**'.") else {
            return Ok(Parsed::Failed);
        };
        Ok(self.node(
            ExprKind::Binary {
                op: BinaryOp::Pow,
                lhs: base,
                rhs: exponent,
            },
            base.span + exponent.span,
        ))
    }

    // ===== Primaries =====

    fn parse_primary(&mut self) -> ParseResult<Parsed<'ast>> {
        let mut expr = match self.parse_atom()? {
            Parsed::Node(expr) => expr,
            other => return Ok(other),
        };

        loop {
            let parsed = match self.tok.kind {
                TokenKind::Dot => self.parse_attribute(expr)?,
                TokenKind::LeftParen => self.parse_call(expr)?,
                TokenKind::LeftSquare => self.parse_subscript(expr)?,
                _ => return Ok(Parsed::Node(expr)),
            };
            expr = match parsed {
                Parsed::Node(next) => next,
                other => return Ok(other),
            };
        }
    }

    fn parse_attribute(&mut self, value: ExprRef<'ast>) -> ParseResult<Parsed<'ast>> {
        self.advance()?;
        if !self.expect(TokenKind::Identifier) {
            let span = self.tok.span;
            self.report(span, "expected attribute name after '.'.");
            return Ok(Parsed::Failed);
        }
        let attr = self.tok.span;
        self.advance()?;
        Ok(self.node(ExprKind::Attribute { value, attr }, value.span + attr))
    }

    fn parse_call(&mut self, callee: ExprRef<'ast>) -> ParseResult<Parsed<'ast>> {
        self.open_bracket()?;

        let mut args = Vec::new();
        while !self.expect(TokenKind::RightParen) {
            let arg_start = self.tok.span;
            let parsed = self.parse_expression()?;
            let Some(arg) = self.require(parsed, arg_start, "expected expression as argument in call.") else {
                return Ok(Parsed::Failed);
            };
            args.push(arg);

            if !self.expect(TokenKind::Comma) {
                break;
            }
            self.advance()?;
        }

        if !self.expect(TokenKind::RightParen) {
            let span = self.tok.span;
            self.report(span, "expected closing ')' after call arguments.");
            return Ok(Parsed::Failed);
        }

        let node = self.node(
            ExprKind::Call {
                callee,
                args: self.arena.alloc_exprs(&args),
            },
            callee.span + self.tok.span,
        );
        self.close_bracket()?;
        Ok(node)
    }

    /// `value[index]` or `value[lower:upper]` with either bound optional.
    fn parse_subscript(&mut self, value: ExprRef<'ast>) -> ParseResult<Parsed<'ast>> {
        self.open_bracket()?;

        let lower = if self.expect(TokenKind::Colon) {
            None
        } else {
            let start = self.tok.span;
            let parsed = self.parse_expression()?;
            match self.require(parsed, start, "expected expression after '[' in subscript.") {
                Some(expr) => Some(expr),
                None => return Ok(Parsed::Failed),
            }
        };

        match (lower, self.tok.kind) {
            (_, TokenKind::Colon) => {
                self.advance()?;
                let upper = if self.expect(TokenKind::RightSquare) {
                    None
                } else {
                    let start = self.tok.span;
                    let parsed = self.parse_expression()?;
                    match self.require(parsed, start, "expected expression after ':' in slice.") {
                        Some(expr) => Some(expr),
                        None => return Ok(Parsed::Failed),
                    }
                };

                if !self.expect(TokenKind::RightSquare) {
                    let span = self.tok.span;
                    self.report(span, "expected closing ']' after slice.");
                    return Ok(Parsed::Failed);
                }
                let node = self.node(ExprKind::Slice { value, lower, upper }, value.span + self.tok.span);
                self.close_bracket()?;
                Ok(node)
            }
            (Some(index), TokenKind::RightSquare) => {
                let node = self.node(ExprKind::Index { value, index }, value.span + self.tok.span);
                self.close_bracket()?;
                Ok(node)
            }
            _ => {
                let span = self.tok.span;
                self.report(span, "expected closing ']' after subscript.");
                Ok(Parsed::Failed)
            }
        }
    }

    fn parse_atom(&mut self) -> ParseResult<Parsed<'ast>> {
        if let Some(radix) = self.tok.kind.int_radix() {
            return self.leaf(ExprKind::IntLiteral { radix });
        }

        match self.tok.kind {
            TokenKind::FloatLiteral => self.leaf(ExprKind::FloatLiteral),
            kind if kind.is_string_literal() => self.leaf(ExprKind::StringLiteral),
            TokenKind::KeywordTrue => self.leaf(ExprKind::BoolLiteral(true)),
            TokenKind::KeywordFalse => self.leaf(ExprKind::BoolLiteral(false)),
            TokenKind::KeywordNone => self.leaf(ExprKind::NoneLiteral),
            TokenKind::Identifier => self.leaf(ExprKind::Name),
            TokenKind::LeftParen => self.parse_paren(),
            TokenKind::LeftSquare => self.parse_list(),
            TokenKind::LeftCurly => self.parse_set_or_dict(),
            // The lexer already reported this token; stand in a literal so
            // the expression can still be built.
            TokenKind::ErrorToken => self.leaf(ExprKind::IntLiteral { radix: 10 }),
            _ => Ok(Parsed::Absent),
        }
    }

    fn parse_paren(&mut self) -> ParseResult<Parsed<'ast>> {
        let lparen = self.tok.span;
        self.open_bracket()?;

        let start = self.tok.span;
        let parsed = self.parse_expression()?;
        let Some(inner) = self.require(parsed, start, "expected expression after '('.") else {
            return Ok(Parsed::Failed);
        };

        if !self.expect(TokenKind::RightParen) {
            let span = self.tok.span;
            self.report(span, "expected closing ')' after expression.");
            return Ok(Parsed::Failed);
        }
        let node = self.node(ExprKind::Paren(inner), lparen + self.tok.span);
        self.close_bracket()?;
        Ok(node)
    }

    fn parse_list(&mut self) -> ParseResult<Parsed<'ast>> {
        let lsquare = self.tok.span;
        self.open_bracket()?;

        let mut elements = Vec::new();
        let mut message = "expected expression after '[' in list literal.";
        while !self.expect(TokenKind::RightSquare) {
            let start = self.tok.span;
            let parsed = self.parse_expression()?;
            let Some(element) = self.require(parsed, start, message) else {
                return Ok(Parsed::Failed);
            };
            elements.push(element);

            if !self.expect(TokenKind::Comma) {
                break;
            }
            self.advance()?;
            message = "expected expression after ',' in list literal.";
        }

        if !self.expect(TokenKind::RightSquare) {
            let span = self.tok.span;
            self.report(span, "expected closing ']' in list literal.");
            return Ok(Parsed::Failed);
        }
        let node = self.node(ExprKind::List(self.arena.alloc_exprs(&elements)), lsquare + self.tok.span);
        self.close_bracket()?;
        Ok(node)
    }

    /// `{` starts a set unless the first element is followed by `:`. An
    /// empty pair of braces is a dict.
    fn parse_set_or_dict(&mut self) -> ParseResult<Parsed<'ast>> {
        let lcurly = self.tok.span;
        self.open_bracket()?;

        if self.expect(TokenKind::RightCurly) {
            let node = self.node(ExprKind::Dict(self.arena.alloc_pairs(&[])), lcurly + self.tok.span);
            self.close_bracket()?;
            return Ok(node);
        }

        let start = self.tok.span;
        let parsed = self.parse_expression()?;
        let Some(first) = self.require(parsed, start, "expected expression after '{' in set literal.") else {
            return Ok(Parsed::Failed);
        };

        if self.expect(TokenKind::Colon) {
            trace!("dict literal at {}", lcurly);
            return self.parse_dict(first, lcurly);
        }

        let mut elements = vec![first];
        while self.expect(TokenKind::Comma) {
            self.advance()?;
            if self.expect(TokenKind::RightCurly) {
                break;
            }

            let start = self.tok.span;
            let parsed = self.parse_expression()?;
            let Some(element) = self.require(parsed, start, "expected expression after ',' in set literal.") else {
                return Ok(Parsed::Failed);
            };
            elements.push(element);
        }

        if !self.expect(TokenKind::RightCurly) {
            let span = self.tok.span;
            self.report(span, "expected closing '}' in set literal.");
            return Ok(Parsed::Failed);
        }
        let node = self.node(ExprKind::Set(self.arena.alloc_exprs(&elements)), lcurly + self.tok.span);
        self.close_bracket()?;
        Ok(node)
    }

    /// Continue a dict literal whose first key has been parsed; the current
    /// token is the `:` after it.
    fn parse_dict(&mut self, first_key: ExprRef<'ast>, lcurly: Span) -> ParseResult<Parsed<'ast>> {
        self.advance()?;

        let start = self.tok.span;
        let parsed = self.parse_expression()?;
        let Some(first_value) = self.require(parsed, start, "expected expression as value after ':' in dict literal.") else {
            return Ok(Parsed::Failed);
        };

        let mut entries = vec![(first_key, first_value)];
        while self.expect(TokenKind::Comma) {
            self.advance()?;
            if self.expect(TokenKind::RightCurly) {
                break;
            }

            let start = self.tok.span;
            let parsed = self.parse_expression()?;
            let Some(key) = self.require(
                parsed,
                start,
                "expected expression as key for key-value pair after ',' in dict literal.",
            ) else {
                return Ok(Parsed::Failed);
            };

            if !self.expect(TokenKind::Colon) {
                let span = self.tok.span;
                self.report(
                    span,
                    "expected ':' between key and value within key-value pair in dict literal.",
                );
                return Ok(Parsed::Failed);
            }
            self.advance()?;

            let start = self.tok.span;
            let parsed = self.parse_expression()?;
            let Some(value) = self.require(
                parsed,
                start,
                "expected expression as value for key-value pair after ':' in dict literal.",
            ) else {
                return Ok(Parsed::Failed);
            };
            entries.push((key, value));
        }

        if !self.expect(TokenKind::RightCurly) {
            let span = self.tok.span;
            self.report(span, "expected closing '}' in dict literal.");
            return Ok(Parsed::Failed);
        }
        let node = self.node(ExprKind::Dict(self.arena.alloc_pairs(&entries)), lcurly + self.tok.span);
        self.close_bracket()?;
        Ok(node)
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
