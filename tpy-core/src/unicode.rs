//! UTF-8 decoding and identifier classification
//!
//! The decoder validates exactly one sequence at a time so the lexer can stay
//! byte-oriented on ASCII and only decode when it meets a lead byte >= 0x80.

use crate::error::{Error, Result};

/// Continuation bytes always fall in this range.
const CONT_LOW: u8 = 0x80;
const CONT_HIGH: u8 = 0xBF;

/// Decode the UTF-8 sequence that starts at `pos`.
///
/// Returns the codepoint and the number of bytes it occupies. Overlong
/// encodings, surrogates, truncated sequences and stray continuation bytes
/// are all rejected with [`Error::MalformedUtf8`].
pub fn decode_utf8(bytes: &[u8], pos: usize) -> Result<(char, usize)> {
    let malformed = || Error::MalformedUtf8 { offset: pos };

    let lead = *bytes.get(pos).ok_or_else(malformed)?;
    if lead < 0x80 {
        return Ok((lead as char, 1));
    }

    // The accepted range of the second byte depends on the lead byte; this is
    // what excludes overlong forms, surrogates and values above U+10FFFF.
    let (width, low, high) = match lead {
        0xC2..=0xDF => (2, CONT_LOW, CONT_HIGH),
        0xE0 => (3, 0xA0, CONT_HIGH),
        0xE1..=0xEC | 0xEE..=0xEF => (3, CONT_LOW, CONT_HIGH),
        0xED => (3, CONT_LOW, 0x9F),
        0xF0 => (4, 0x90, CONT_HIGH),
        0xF1..=0xF3 => (4, CONT_LOW, CONT_HIGH),
        0xF4 => (4, CONT_LOW, 0x8F),
        _ => return Err(malformed()),
    };

    let tail = bytes.get(pos + 1..pos + width).ok_or_else(malformed)?;
    if !(low..=high).contains(&tail[0])
        || tail[1..].iter().any(|b| !(CONT_LOW..=CONT_HIGH).contains(b))
    {
        return Err(malformed());
    }

    let mut codepoint = u32::from(lead & (0x7F >> width));
    for byte in tail {
        codepoint = (codepoint << 6) | u32::from(byte & 0x3F);
    }

    char::from_u32(codepoint)
        .map(|c| (c, width))
        .ok_or_else(malformed)
}

/// Width of the sequence at `pos`, treating an undecodable byte as a
/// sequence of its own. Used for column computation, which must never fail.
pub fn width_lossy(bytes: &[u8], pos: usize) -> usize {
    decode_utf8(bytes, pos).map_or(1, |(_, width)| width)
}

/// Whether `c` may begin an identifier.
pub fn is_identifier_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

/// Whether `c` may continue an identifier.
pub fn is_identifier_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}
