use super::*;

#[test]
fn integers_are_little_endian() {
    let bytes = [
        0x34, 0x12, // u16
        0x78, 0x56, 0x34, 0x12, // u32
        0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01, // u64
        0xff,
    ];
    let mut r = FieldReader::new(&bytes);
    assert_eq!(r.read_u16_le().unwrap(), 0x1234);
    assert_eq!(r.read_u32_le().unwrap(), 0x1234_5678);
    assert_eq!(r.read_u64_le().unwrap(), 0x0102_0304_0506_0708);
    assert_eq!(r.read_u8().unwrap(), 0xff);
    assert!(r.at_end());
}

#[test]
fn short_read_reports_offset_and_does_not_advance() {
    let bytes = [1u8, 2, 3];
    let mut r = FieldReader::new(&bytes);
    r.read_u8().unwrap();
    let err = r.read_u64_le().unwrap_err();
    assert_eq!(
        err,
        DecodeError::Truncated {
            offset: 1,
            needed: 8,
            available: 2
        }
    );
    assert_eq!(r.position(), 1);
}

#[test]
fn huge_lengths_are_truncation_not_panics() {
    let bytes = [0u8; 4];
    let mut r = FieldReader::new(&bytes);
    assert!(matches!(
        r.read_bytes(u64::MAX),
        Err(DecodeError::Truncated { .. })
    ));
    assert!(matches!(
        r.sub_reader(u64::MAX),
        Err(DecodeError::Truncated { .. })
    ));
}

#[test]
fn fixed_ascii_reads_exact_width() {
    let mut r = FieldReader::new(b"CIFFrest");
    assert_eq!(r.read_fixed_ascii(4).unwrap(), "CIFF");
    assert_eq!(r.remaining(), 4);
}

#[test]
fn line_text_consumes_delimiter() {
    let mut r = FieldReader::new(b"hello\nworld");
    assert_eq!(r.read_line_text().unwrap(), "hello");
    assert_eq!(r.position(), 6);
    assert!(matches!(
        r.read_line_text(),
        Err(DecodeError::Truncated { offset: 6, .. })
    ));
}

#[test]
fn empty_line_is_allowed() {
    let mut r = FieldReader::new(b"\nx");
    assert_eq!(r.read_line_text().unwrap(), "");
    assert_eq!(r.position(), 1);
}

#[test]
fn nul_strings_fill_the_limit() {
    let mut r = FieldReader::new(b"a\0bc\0\0tail");
    let tags = r.read_nul_delimited_strings_until(Some(6)).unwrap();
    assert_eq!(tags, vec!["a".to_string(), "bc".to_string(), String::new()]);
    assert_eq!(r.position(), 6);
}

#[test]
fn nul_strings_require_terminator_before_limit() {
    let mut r = FieldReader::new(b"ab\0cd");
    assert!(matches!(
        r.read_nul_delimited_strings_until(None),
        Err(DecodeError::Truncated { offset: 3, .. })
    ));
}

#[test]
fn nul_strings_with_no_room_are_empty() {
    let mut r = FieldReader::new(b"xyz");
    r.read_bytes(3).unwrap();
    assert!(r.read_nul_delimited_strings_until(None).unwrap().is_empty());
}

#[test]
fn nul_strings_limit_past_end_is_truncation() {
    let mut r = FieldReader::new(b"a\0");
    assert!(matches!(
        r.read_nul_delimited_strings_until(Some(10)),
        Err(DecodeError::Truncated { .. })
    ));
}

#[test]
fn sub_reader_is_bounded_and_keeps_absolute_offsets() {
    let bytes = [0u8, 1, 2, 3, 4, 5];
    let mut r = FieldReader::new(&bytes);
    r.read_u8().unwrap();
    let mut child = r.sub_reader(3).unwrap();
    assert_eq!(r.position(), 4);
    assert_eq!(child.position(), 1);
    assert_eq!(child.end(), 4);
    assert_eq!(child.read_bytes(2).unwrap(), &[1, 2]);
    assert!(matches!(
        child.read_u16_le(),
        Err(DecodeError::Truncated {
            offset: 3,
            needed: 2,
            available: 1
        })
    ));
}

#[test]
fn expect_end_reports_trailing_bytes() {
    let mut r = FieldReader::new(&[1u8, 2, 3]);
    r.read_u8().unwrap();
    assert_eq!(
        r.expect_end(),
        Err(DecodeError::UnexpectedTrailingData {
            offset: 1,
            remaining: 2
        })
    );
    r.read_bytes(2).unwrap();
    r.expect_end().unwrap();
}

#[test]
fn expect_position_past_end_is_truncation() {
    let r = FieldReader::new(&[1u8, 2]);
    assert!(matches!(
        r.expect_position(5),
        Err(DecodeError::Truncated { .. })
    ));
}
