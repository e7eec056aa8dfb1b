use super::*;
use crate::fixtures::{CaffBuilder, CiffBuilder};
use crate::foundation::error::DecodeError;

#[test]
fn detect_recognises_both_formats() {
    assert_eq!(
        Format::detect(&CiffBuilder::new(1, 1).build()),
        Some(Format::Ciff)
    );
    assert_eq!(Format::detect(&CaffBuilder::new().build()), Some(Format::Caff));
    assert_eq!(Format::detect(b"PNG"), None);
    assert_eq!(Format::detect(&[1u8; 12]), None);
    assert_eq!(Format::detect(&[]), None);
}

#[test]
fn decode_dispatches_on_format() {
    let ciff = CiffBuilder::new(1, 1).build();
    let decoded = decode(&ciff, Format::Ciff, &DecodeConfig::default()).unwrap();
    assert_eq!(decoded.format(), Format::Ciff);

    let caff = CaffBuilder::new().animation(3, &ciff).build();
    let decoded = decode(&caff, Format::Caff, &DecodeConfig::default()).unwrap();
    assert_eq!(decoded.format(), Format::Caff);
}

#[test]
fn wrong_mode_fails_cleanly() {
    let ciff = CiffBuilder::new(1, 1).build();
    // 'C' (0x43) is not a valid first block tag.
    assert_eq!(
        decode(&ciff, Format::Caff, &DecodeConfig::default()),
        Err(DecodeError::UnknownBlockTag { tag: b'C' })
    );

    let caff = CaffBuilder::new().build();
    assert!(matches!(
        decode(&caff, Format::Ciff, &DecodeConfig::default()),
        Err(DecodeError::MalformedMagic { .. })
    ));
}
