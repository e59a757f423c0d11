//! Python keyword table

use crate::token::TokenKind;

pub const MIN_KEYWORD_LEN: usize = 2;
pub const MAX_KEYWORD_LEN: usize = 8;

/// Case-sensitive keyword lookup on the raw identifier bytes.
pub fn lookup(ident: &[u8]) -> Option<TokenKind> {
    if !(MIN_KEYWORD_LEN..=MAX_KEYWORD_LEN).contains(&ident.len()) {
        return None;
    }

    let kind = match ident {
        b"False" => TokenKind::KeywordFalse,
        b"None" => TokenKind::KeywordNone,
        b"True" => TokenKind::KeywordTrue,
        b"and" => TokenKind::KeywordAnd,
        b"as" => TokenKind::KeywordAs,
        b"assert" => TokenKind::KeywordAssert,
        b"async" => TokenKind::KeywordAsync,
        b"await" => TokenKind::KeywordAwait,
        b"break" => TokenKind::KeywordBreak,
        b"class" => TokenKind::KeywordClass,
        b"continue" => TokenKind::KeywordContinue,
        b"def" => TokenKind::KeywordDef,
        b"del" => TokenKind::KeywordDel,
        b"elif" => TokenKind::KeywordElif,
        b"else" => TokenKind::KeywordElse,
        b"except" => TokenKind::KeywordExcept,
        b"finally" => TokenKind::KeywordFinally,
        b"for" => TokenKind::KeywordFor,
        b"from" => TokenKind::KeywordFrom,
        b"global" => TokenKind::KeywordGlobal,
        b"if" => TokenKind::KeywordIf,
        b"import" => TokenKind::KeywordImport,
        b"in" => TokenKind::KeywordIn,
        b"is" => TokenKind::KeywordIs,
        b"lambda" => TokenKind::KeywordLambda,
        b"nonlocal" => TokenKind::KeywordNonlocal,
        b"not" => TokenKind::KeywordNot,
        b"or" => TokenKind::KeywordOr,
        b"pass" => TokenKind::KeywordPass,
        b"raise" => TokenKind::KeywordRaise,
        b"return" => TokenKind::KeywordReturn,
        b"try" => TokenKind::KeywordTry,
        b"while" => TokenKind::KeywordWhile,
        b"with" => TokenKind::KeywordWith,
        b"yield" => TokenKind::KeywordYield,
        _ => return None,
    };
    Some(kind)
}
