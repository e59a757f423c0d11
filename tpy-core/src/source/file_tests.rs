use super::*;

fn file(text: &str) -> SourceFile {
    SourceFile::new("test.py", 0, ByteBuffer::from_bytes(text))
}

// ===== Line Map Tests =====

#[test]
fn test_line_map_records_every_terminator() {
    let f = file("a\nb\r\nc\rd");
    assert_eq!(
        f.line_map(),
        &[
            NewlineRecord { pos: 1, len: 1 },
            NewlineRecord { pos: 3, len: 2 },
            NewlineRecord { pos: 6, len: 1 },
        ]
    );
    assert_eq!(f.line_count(), 4);
}

#[test]
fn test_no_terminators_is_single_line() {
    let f = file("x + y");
    assert!(f.line_map().is_empty());
    assert_eq!(f.line_no(0), 1);
    assert_eq!(f.line_no(4), 1);
}

// ===== Location Tests =====

#[test]
fn test_line_numbers() {
    let f = file("ab\ncd\nef");
    assert_eq!(f.line_no(0), 1);
    // The terminator belongs to the line it ends.
    assert_eq!(f.line_no(2), 1);
    assert_eq!(f.line_no(3), 2);
    assert_eq!(f.line_no(6), 3);
    assert_eq!(f.line_no(7), 3);
}

#[test]
fn test_columns_count_codepoints() {
    let f = file("é = 1\nλx");
    // "é" is two bytes but one column.
    assert_eq!(f.location(2).col, 2);
    assert_eq!(f.location(3).col, 3);
    // "λ" starts line 2, "x" follows it at byte 9.
    let loc = f.location(9);
    assert_eq!((loc.line, loc.col), (2, 2));
}

#[test]
fn test_crlf_line_start() {
    let f = file("a\r\nbc");
    let loc = f.location(4);
    assert_eq!((loc.line, loc.col), (2, 2));
}

#[test]
fn test_bom_maps_to_first_column() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(b"xy");
    let f = SourceFile::new("bom.py", 0, ByteBuffer::from_bytes(bytes));
    assert!(f.has_bom());
    assert_eq!(f.start(), 3);
    let loc = f.location(f.start());
    assert_eq!((loc.line, loc.col), (1, 1));
    assert_eq!(f.location(4).col, 2);
}

#[test]
fn test_invalid_utf8_column_is_lossy() {
    let f = SourceFile::new("bad.py", 0, ByteBuffer::from_bytes(vec![b'a', 0xFF, b'b']));
    assert_eq!(f.location(2).col, 3);
}

#[test]
fn test_location_display() {
    let f = file("a\nb");
    assert_eq!(f.location(2).to_string(), "test.py:2:1");
}

// ===== Span Tests =====

#[test]
fn test_span_carries_offset() {
    let f = SourceFile::new("b.py", 100, ByteBuffer::from_bytes("abc"));
    let span = f.span(1, 2);
    assert_eq!(span.absolute_pos, 101);
    assert_eq!(span.file_offset(), 100);
    assert_eq!(f.text(span), "bc");
}

#[test]
fn test_text_clamps_to_end() {
    let f = file("abc");
    assert_eq!(f.text(f.span(2, 10)), "c");
}
