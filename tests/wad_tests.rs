//! tests/wad_tests.rs
//! Container parse/write cases, including incomplete prefixes.

use wadcrypt::wad::{parse_wad, write_wad, write_wad_with_trailer};
use wadcrypt::WadcryptError;

const PAYLOAD: &[u8] = b"opaque encrypted payload bytes";
const KEY_REF: &str = "/keys/message.key";

#[test]
fn streaming_layout_roundtrips() {
    let mut container = Vec::new();
    write_wad(&mut container, KEY_REF, PAYLOAD).unwrap();

    let head = parse_wad(&container).unwrap();
    assert_eq!(head.key_file, KEY_REF);
    assert_eq!(head.payload_size, 0);
    assert_eq!(
        &container[head.payload_offset as usize..],
        PAYLOAD,
        "payload must run to the end of the container"
    );
}

#[test]
fn trailer_layout_roundtrips() {
    let mut container = Vec::new();
    write_wad_with_trailer(&mut container, KEY_REF, PAYLOAD).unwrap();

    let head = parse_wad(&container).unwrap();
    assert_eq!(head.key_file, KEY_REF);
    assert_eq!(head.payload_size as usize, PAYLOAD.len());
    let start = head.payload_offset as usize;
    assert_eq!(&container[start..start + PAYLOAD.len()], PAYLOAD);
}

#[test]
fn streaming_layout_parses_from_its_prefix() {
    let mut container = Vec::new();
    write_wad(&mut container, KEY_REF, PAYLOAD).unwrap();

    // Once the header, directory and key string are buffered, the parse
    // succeeds without the payload.
    let prefix_len = 12 + 2 * 16 + KEY_REF.len();
    let head = parse_wad(&container[..prefix_len]).unwrap();
    assert_eq!(head.key_file, KEY_REF);
}

#[test]
fn incomplete_prefixes_are_reported_as_such() {
    let mut container = Vec::new();
    write_wad_with_trailer(&mut container, KEY_REF, PAYLOAD).unwrap();

    // The trailer layout needs the whole container; every proper prefix
    // is incomplete.
    for cut in [0, 4, 11, 12, 20, container.len() - 1] {
        assert!(
            matches!(
                parse_wad(&container[..cut]),
                Err(WadcryptError::InvalidOrIncompleteWad)
            ),
            "prefix of {cut} bytes"
        );
    }
}

#[test]
fn bad_magic_rejected() {
    let mut container = Vec::new();
    write_wad(&mut container, KEY_REF, PAYLOAD).unwrap();
    container[0] = b'X';

    assert!(matches!(
        parse_wad(&container),
        Err(WadcryptError::InvalidOrIncompleteWad)
    ));
}

#[test]
fn missing_payload_lump_rejected() {
    // A container whose only lump is the key reference.
    let mut container = Vec::new();
    container.extend_from_slice(b"IWAD");
    container.extend_from_slice(&1u32.to_le_bytes());
    container.extend_from_slice(&12u32.to_le_bytes());
    container.extend_from_slice(&28u32.to_le_bytes()); // filepos
    container.extend_from_slice(&0u32.to_le_bytes()); // size
    container.extend_from_slice(b"_KEYPATH");

    assert!(matches!(
        parse_wad(&container),
        Err(WadcryptError::InvalidOrIncompleteWad)
    ));
}

#[test]
fn empty_key_reference_is_allowed() {
    let mut container = Vec::new();
    write_wad(&mut container, "", PAYLOAD).unwrap();

    let head = parse_wad(&container).unwrap();
    assert!(head.key_file.is_empty());
}
