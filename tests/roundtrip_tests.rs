//! tests/roundtrip_tests.rs
//! The four encrypt/decrypt laws, swept over plaintext sizes that stress
//! block and hold-back boundaries.

mod common;

use common::*;
use std::io::Cursor;
use wadcrypt::pipeline::{DecryptConfig, Metadata};
use wadcrypt::{encrypt_nested, encrypt_wad};

// Sizes around the cipher block, the reader's 48-byte hold-back window,
// and a couple of multi-chunk lengths.
const SIZES: &[usize] = &[0, 1, 15, 16, 17, 47, 48, 49, 64, 100, 1000, 4096, 5000];

fn plain_of(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[test]
fn passphrase_envelope_roundtrips() {
    for &len in SIZES {
        let plain = plain_of(len);
        let encrypted = encrypt_to_vec(&plain, TEST_PASSPHRASE);

        let config = DecryptConfig::new(TEST_PASSPHRASE);
        let mut metadata = Metadata::default();
        let out = decrypt_to_vec(&encrypted, &config, &mut metadata).unwrap();

        assert_eq!(out, plain, "mismatch at {len} bytes");
    }
}

#[test]
fn key_file_envelope_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let key_path = write_key_file(&dir, TEST_KEY_SECRET);

    for &len in SIZES {
        let plain = plain_of(len);
        let encrypted = encrypt_to_vec(&plain, TEST_KEY_SECRET);

        let config = DecryptConfig::new("");
        let mut metadata = Metadata {
            key_file: key_path.clone(),
            key_only: true,
        };
        let out = decrypt_to_vec(&encrypted, &config, &mut metadata).unwrap();

        assert_eq!(out, plain, "mismatch at {len} bytes");
    }
}

#[test]
fn wad_wrapped_envelope_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let key_path = write_key_file(&dir, TEST_KEY_SECRET);

    for &len in SIZES {
        let plain = plain_of(len);
        let mut container = Vec::new();
        encrypt_wad(
            Cursor::new(&plain),
            &mut container,
            &passphrase(TEST_KEY_SECRET),
            TEST_ITERATIONS,
            &key_path,
        )
        .unwrap();

        let config = DecryptConfig::new("");
        let mut metadata = Metadata::default();
        let out = decrypt_to_vec(&container, &config, &mut metadata).unwrap();

        assert_eq!(out, plain, "mismatch at {len} bytes");
        assert_eq!(metadata.key_file, key_path);
    }
}

#[test]
fn nested_wad_envelope_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let key_path = write_key_file(&dir, TEST_KEY_SECRET);

    for &len in SIZES {
        let plain = plain_of(len);
        let mut nested = Vec::new();
        encrypt_nested(
            Cursor::new(&plain),
            &mut nested,
            &passphrase(TEST_PASSPHRASE),
            &passphrase(TEST_KEY_SECRET),
            TEST_ITERATIONS,
            &key_path,
        )
        .unwrap();

        let config = DecryptConfig::new(TEST_PASSPHRASE);
        let mut metadata = Metadata::default();
        let out = decrypt_to_vec(&nested, &config, &mut metadata).unwrap();

        assert_eq!(out, plain, "mismatch at {len} bytes");
    }
}
