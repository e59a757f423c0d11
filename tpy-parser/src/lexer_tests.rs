use super::*;
use tpy_core::ByteBuffer;
use TokenKind::*;

fn source(src: impl Into<Vec<u8>>) -> SourceFile {
    SourceFile::new("test.py", 0, ByteBuffer::from_bytes(src))
}

fn kinds(src: &str) -> (Vec<TokenKind>, Diagnostics) {
    let file = source(src);
    let mut diagnostics = Diagnostics::new();
    let tokens = Lexer::new(&file, &mut diagnostics).tokenize().unwrap();
    (tokens.iter().map(|tok| tok.kind).collect(), diagnostics)
}

/// Kind and source text of every token before `End`.
fn lexemes(src: &str) -> Vec<(TokenKind, String)> {
    let file = source(src);
    let mut diagnostics = Diagnostics::new();
    let tokens = Lexer::new(&file, &mut diagnostics).tokenize().unwrap();
    tokens
        .iter()
        .filter(|tok| !tok.is(End))
        .map(|tok| (tok.kind, file.text(tok.span).into_owned()))
        .collect()
}

// ===== Operator Tests =====

#[test]
fn test_operator_sequence() {
    let (tokens, diagnostics) = kinds("+ += -= : != !\n<< >>=");
    assert_eq!(
        tokens,
        vec![
            Plus,
            PlusEquals,
            MinusEquals,
            Colon,
            ExclamationEquals,
            ErrorToken,
            Newline,
            LessLess,
            GreaterGreaterEquals,
            End
        ]
    );
    assert!(diagnostics.has_errors());
    assert_eq!(
        diagnostics.messages(),
        vec!["invalid operator '!'. Did you mean 'not' instead?"]
    );
}

#[test]
fn test_longest_operator_wins() {
    let (tokens, diagnostics) = kinds("a**=b//c:=d->e");
    assert_eq!(
        tokens,
        vec![
            Identifier,
            AsteriskAsteriskEquals,
            Identifier,
            SlashSlash,
            Identifier,
            ColonEquals,
            Identifier,
            Arrow,
            Identifier,
            End
        ]
    );
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_delimiters() {
    let (tokens, _) = kinds("()[]{},.;@");
    assert_eq!(
        tokens,
        vec![
            LeftParen,
            RightParen,
            LeftSquare,
            RightSquare,
            LeftCurly,
            RightCurly,
            Comma,
            Dot,
            Semicolon,
            At,
            End
        ]
    );
}

// ===== Identifier and Keyword Tests =====

#[test]
fn test_identifiers_and_keywords() {
    let (tokens, diagnostics) = kinds("foo bar\ntry True False");
    assert_eq!(
        tokens,
        vec![
            Identifier,
            Identifier,
            Newline,
            KeywordTry,
            KeywordTrue,
            KeywordFalse,
            End
        ]
    );
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_eq!(
        lexemes("iffy nonlocally _if"),
        vec![
            (Identifier, "iffy".to_string()),
            (Identifier, "nonlocally".to_string()),
            (Identifier, "_if".to_string()),
        ]
    );
}

#[test]
fn test_unicode_identifiers() {
    let (tokens, diagnostics) = kinds("π = café + 変数");
    assert_eq!(tokens, vec![Identifier, Equals, Identifier, Plus, Identifier, End]);
    assert!(!diagnostics.has_errors());

    assert_eq!(lexemes("naïve")[0].1, "naïve");
}

#[test]
fn test_invalid_character_is_skipped() {
    let (tokens, diagnostics) = kinds("a $ b");
    assert_eq!(tokens, vec![Identifier, Identifier, End]);
    assert_eq!(diagnostics.messages(), vec!["invalid character '$' (U+0024)."]);

    let (tokens, diagnostics) = kinds("a € b");
    assert_eq!(tokens, vec![Identifier, Identifier, End]);
    assert_eq!(diagnostics.messages(), vec!["invalid character '€' (U+20AC)."]);
}

// ===== Number Tests =====

#[test]
fn test_decimal_integers() {
    let (tokens, diagnostics) = kinds("0 7 1_000 00");
    assert_eq!(tokens, vec![IntLiteral, IntLiteral, IntLiteral, IntLiteral, End]);
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_separator_between_digits() {
    assert_eq!(lexemes("1_0"), vec![(IntLiteral, "1_0".to_string())]);
}

#[test]
fn test_trailing_separator_cuts_literal() {
    let file = source("1_");
    let mut diagnostics = Diagnostics::new();
    let tokens = Lexer::new(&file, &mut diagnostics).tokenize().unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, IntLiteral);
    assert_eq!(file.text(tokens[0].span), "1");
    assert_eq!(tokens[1].kind, End);
    assert_eq!(tokens[1].span.local_pos, 2);
    assert_eq!(
        diagnostics.messages(),
        vec!["a numeric separator must be followed by a valid digit."]
    );
    let reported = diagnostics.iter().next().unwrap();
    assert_eq!((reported.line, reported.col), (1, 2));
}

#[test]
fn test_leading_zeros_reported() {
    let (tokens, diagnostics) = kinds("0123");
    assert_eq!(tokens, vec![IntLiteral, End]);
    assert_eq!(
        diagnostics.messages(),
        vec!["leading zeros in decimal integer literals are not permitted."]
    );
}

#[test]
fn test_prefixed_integers() {
    assert_eq!(
        lexemes("0xFF 0o17 0b1010 0X_a 0B1_1"),
        vec![
            (HexIntLiteral, "0xFF".to_string()),
            (OctalIntLiteral, "0o17".to_string()),
            (BinaryIntLiteral, "0b1010".to_string()),
            (HexIntLiteral, "0X_a".to_string()),
            (BinaryIntLiteral, "0B1_1".to_string()),
        ]
    );
}

#[test]
fn test_separator_after_prefix_without_digit() {
    let (tokens, diagnostics) = kinds("0x_");
    assert_eq!(tokens, vec![HexIntLiteral, End]);
    assert_eq!(
        diagnostics.messages(),
        vec!["a hexadecimal prefix must be followed by a valid digit."]
    );
    assert_eq!(lexemes("0x_ + 1")[0], (HexIntLiteral, "0x".to_string()));

    let (tokens, diagnostics) = kinds("0o_9");
    assert_eq!(tokens, vec![OctalIntLiteral, IntLiteral, End]);
    assert_eq!(diagnostics.len(), 1);

    let (tokens, _) = kinds("0b_2 + x");
    assert_eq!(tokens, vec![BinaryIntLiteral, IntLiteral, Plus, Identifier, End]);
}

#[test]
fn test_prefix_without_digit() {
    let (tokens, diagnostics) = kinds("0x");
    assert_eq!(tokens, vec![HexIntLiteral, End]);
    assert_eq!(
        diagnostics.messages(),
        vec!["a hexadecimal prefix must be followed by a valid digit."]
    );

    let (tokens, diagnostics) = kinds("0o9");
    assert_eq!(tokens, vec![OctalIntLiteral, IntLiteral, End]);
    assert_eq!(
        diagnostics.messages(),
        vec!["a octal prefix must be followed by a valid digit."]
    );

    let (_, diagnostics) = kinds("0b2");
    assert_eq!(
        diagnostics.messages(),
        vec!["a binary prefix must be followed by a valid digit."]
    );
}

#[test]
fn test_floats() {
    assert_eq!(
        lexemes("3.14 .5 1e10 2.5E-3 1_0.0_1 7e+2"),
        vec![
            (FloatLiteral, "3.14".to_string()),
            (FloatLiteral, ".5".to_string()),
            (FloatLiteral, "1e10".to_string()),
            (FloatLiteral, "2.5E-3".to_string()),
            (FloatLiteral, "1_0.0_1".to_string()),
            (FloatLiteral, "7e+2".to_string()),
        ]
    );
}

#[test]
fn test_float_missing_fraction_digit() {
    let file = source("1.x");
    let mut diagnostics = Diagnostics::new();
    let tokens = Lexer::new(&file, &mut diagnostics).tokenize().unwrap();

    assert_eq!(tokens[0].kind, FloatLiteral);
    assert_eq!(file.text(tokens[0].span), "1.");
    assert_eq!(tokens[1].kind, Identifier);
    assert_eq!(
        diagnostics.messages(),
        vec!["a floating point must be followed by a digit."]
    );
    let reported = diagnostics.iter().next().unwrap();
    assert_eq!(reported.col, 3);
}

#[test]
fn test_attribute_dot_is_not_a_float() {
    let (tokens, diagnostics) = kinds("a.b");
    assert_eq!(tokens, vec![Identifier, Dot, Identifier, End]);
    assert!(!diagnostics.has_errors());
}

// ===== String Tests =====

#[test]
fn test_string_quotes() {
    assert_eq!(
        lexemes(r#""double" 'single'"#),
        vec![
            (DoubleQuotedStringLiteral, "\"double\"".to_string()),
            (SingleQuotedStringLiteral, "'single'".to_string()),
        ]
    );
}

#[test]
fn test_string_prefixes() {
    let (tokens, diagnostics) = kinds(r#"r'\d' b"x" f'{a}' Rb'y' fr"z" u'w'"#);
    assert_eq!(
        tokens,
        vec![
            SingleQuotedStringLiteral,
            DoubleQuotedStringLiteral,
            SingleQuotedStringLiteral,
            SingleQuotedStringLiteral,
            DoubleQuotedStringLiteral,
            SingleQuotedStringLiteral,
            End
        ]
    );
    assert!(!diagnostics.has_errors());
    assert_eq!(lexemes("rb'a'")[0].1, "rb'a'");
}

#[test]
fn test_prefix_letter_without_quote_is_identifier() {
    assert_eq!(lexemes("rb")[0], (Identifier, "rb".to_string()));
}

#[test]
fn test_string_escapes() {
    let (tokens, diagnostics) = kinds(r#"'it\'s' "a\"b" '\\'"#);
    assert_eq!(
        tokens,
        vec![
            SingleQuotedStringLiteral,
            DoubleQuotedStringLiteral,
            SingleQuotedStringLiteral,
            End
        ]
    );
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_triple_quoted_string_spans_lines() {
    let src = "x = '''one\ntwo ' '' three'''\ny";
    let (tokens, diagnostics) = kinds(src);
    assert_eq!(
        tokens,
        vec![
            Identifier,
            Equals,
            SingleQuotedStringLiteral,
            Newline,
            Identifier,
            End
        ]
    );
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_unterminated_string_at_newline() {
    let file = source("'abc\nx");
    let mut diagnostics = Diagnostics::new();
    let tokens = Lexer::new(&file, &mut diagnostics).tokenize().unwrap();

    assert_eq!(tokens[0].kind, SingleQuotedStringLiteral);
    assert_eq!(file.text(tokens[0].span), "'abc");
    assert_eq!(tokens[1].kind, Newline);
    assert_eq!(diagnostics.messages(), vec!["unterminated string literal."]);
    let reported = diagnostics.iter().next().unwrap();
    assert_eq!((reported.line, reported.col), (1, 1));
}

#[test]
fn test_unterminated_triple_string_at_end() {
    let (tokens, diagnostics) = kinds("\"\"\"never closed\n");
    assert_eq!(tokens, vec![DoubleQuotedStringLiteral, End]);
    assert_eq!(diagnostics.messages(), vec!["unterminated string literal."]);
}

// ===== Layout Tests =====

#[test]
fn test_indent_and_dedent() {
    let (tokens, diagnostics) = kinds("if x:\n    a\nb");
    assert_eq!(
        tokens,
        vec![
            KeywordIf,
            Identifier,
            Colon,
            Newline,
            Indent,
            Identifier,
            Newline,
            Dedent,
            Identifier,
            End
        ]
    );
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_one_dedent_per_closed_level() {
    let (tokens, _) = kinds("a\n  b\n    c\nd\n");
    assert_eq!(
        tokens,
        vec![
            Identifier, Newline, Indent, Identifier, Newline, Indent, Identifier, Newline, Dedent,
            Dedent, Identifier, Newline, End
        ]
    );
}

#[test]
fn test_dedents_at_end_of_input() {
    let file = source("a\n  b\n    c");
    let mut diagnostics = Diagnostics::new();
    let tokens = Lexer::new(&file, &mut diagnostics).tokenize().unwrap();
    let tail: Vec<_> = tokens[tokens.len() - 3..].iter().map(|tok| tok.kind).collect();

    assert_eq!(tail, vec![Dedent, Dedent, End]);
    for tok in &tokens[tokens.len() - 3..] {
        assert_eq!(tok.span.local_pos, file.end());
        assert!(tok.span.is_empty());
    }
}

#[test]
fn test_inconsistent_dedent() {
    let (tokens, diagnostics) = kinds("a\n    b\n  c\n");
    assert_eq!(
        tokens,
        vec![Identifier, Newline, Indent, Identifier, Newline, Dedent, Identifier, Newline, End]
    );
    assert_eq!(
        diagnostics.messages(),
        vec!["unindent does not match any outer indentation level."]
    );
}

#[test]
fn test_tab_width() {
    let (tokens, _) = kinds("a\n\tb\n    c");
    assert_eq!(
        tokens,
        vec![Identifier, Newline, Indent, Identifier, Newline, Identifier, Dedent, End]
    );

    let file = source("a\n\tb\n    c");
    let mut diagnostics = Diagnostics::new();
    let config = FrontendConfig {
        tab_width: 8,
        ..FrontendConfig::default()
    };
    let tokens = Lexer::new(&file, &mut diagnostics)
        .with_config(&config)
        .tokenize()
        .unwrap();
    let kinds: Vec<_> = tokens.iter().map(|tok| tok.kind).collect();
    assert!(kinds.contains(&Dedent));
    assert_eq!(
        diagnostics.messages(),
        vec!["unindent does not match any outer indentation level."]
    );
}

#[test]
fn test_blank_and_comment_lines_keep_indentation() {
    let (tokens, diagnostics) = kinds("a\n    b\n\n  # note\n    c\n");
    assert_eq!(
        tokens,
        vec![
            Identifier, Newline, Indent, Identifier, Newline, Newline, Newline, Identifier,
            Newline, Dedent, End
        ]
    );
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_comments_are_skipped() {
    let (tokens, _) = kinds("a # trailing + - *\nb");
    assert_eq!(tokens, vec![Identifier, Newline, Identifier, End]);
}

#[test]
fn test_line_continuation() {
    let (tokens, diagnostics) = kinds("a + \\\n    b");
    assert_eq!(tokens, vec![Identifier, Plus, Identifier, End]);
    assert!(!diagnostics.has_errors());

    let (_, diagnostics) = kinds("a \\ b");
    assert_eq!(
        diagnostics.messages(),
        vec!["unexpected character after line continuation character."]
    );
}

#[test]
fn test_skip_newlines() {
    let file = source("a\nb\nc");
    let mut diagnostics = Diagnostics::new();
    let mut lexer = Lexer::new(&file, &mut diagnostics);
    let mut tok = Token::dummy();

    lexer.next_token(&mut tok).unwrap();
    assert_eq!(tok.kind, Identifier);

    lexer.skip_newlines();
    assert!(!lexer.accepts_newlines());
    lexer.next_token(&mut tok).unwrap();
    assert_eq!(tok.kind, Identifier);

    lexer.allow_newlines();
    lexer.next_token(&mut tok).unwrap();
    assert_eq!(tok.kind, Newline);
    lexer.next_token(&mut tok).unwrap();
    assert_eq!(tok.kind, Identifier);
    lexer.next_token(&mut tok).unwrap();
    assert_eq!(tok.kind, End);
}

// ===== Encoding Tests =====

#[test]
fn test_crlf_newlines() {
    let file = source("a\r\nb\rc");
    let mut diagnostics = Diagnostics::new();
    let tokens = Lexer::new(&file, &mut diagnostics).tokenize().unwrap();
    let kinds: Vec<_> = tokens.iter().map(|tok| tok.kind).collect();

    assert_eq!(
        kinds,
        vec![Identifier, Newline, Identifier, Newline, Identifier, End]
    );
    assert_eq!(tokens[1].span.len, 2);
    assert_eq!(tokens[3].span.len, 1);
}

#[test]
fn test_bom_is_skipped() {
    let file = source(b"\xEF\xBB\xBFx".to_vec());
    let mut diagnostics = Diagnostics::new();
    let tokens = Lexer::new(&file, &mut diagnostics).tokenize().unwrap();

    assert_eq!(tokens[0].kind, Identifier);
    assert_eq!(tokens[0].span.local_pos, 3);
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_embedded_nul_is_skipped() {
    let (tokens, diagnostics) = kinds("a\0b");
    assert_eq!(tokens, vec![Identifier, Identifier, End]);
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_empty_input() {
    let (tokens, diagnostics) = kinds("");
    assert_eq!(tokens, vec![End]);
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_malformed_utf8_is_fatal() {
    let file = source(b"a \xFF b".to_vec());
    let mut diagnostics = Diagnostics::new();
    let err = Lexer::new(&file, &mut diagnostics).tokenize().unwrap_err();
    assert_eq!(err.kind(), crate::error::ErrorKind::MalformedUtf8);
    assert!(matches!(err, ParseError::MalformedUtf8 { position: 2 }));
}

#[test]
fn test_spans_in_shared_address_space() {
    let file = SourceFile::new("second.py", 100, ByteBuffer::from_bytes("xy + z"));
    let mut diagnostics = Diagnostics::new();
    let tokens = Lexer::new(&file, &mut diagnostics).tokenize().unwrap();

    assert_eq!(tokens[1].span.local_pos, 3);
    assert_eq!(tokens[1].span.absolute_pos, 103);
    assert_eq!(tokens[2].span.file_offset(), 100);
}
