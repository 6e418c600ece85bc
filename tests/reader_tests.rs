//! tests/reader_tests.rs
//! MessageReader contract tests: incremental feeding must match one-shot
//! decryption, and the update/finish protocol is enforced.

mod common;

use common::*;
use wadcrypt::message::MessageReader;
use wadcrypt::WadcryptError;

fn one_shot(encrypted: &[u8], secret: &str) -> Vec<u8> {
    let mut reader = MessageReader::new(passphrase(secret));
    let mut buf = encrypted.to_vec();
    reader.finish(&mut buf).unwrap();
    buf
}

#[test]
fn incremental_feeding_matches_one_shot() {
    let plain: Vec<u8> = (0..777u32).map(|i| (i * 7 % 256) as u8).collect();
    let encrypted = encrypt_to_vec(&plain, TEST_PASSPHRASE);
    let expected = one_shot(&encrypted, TEST_PASSPHRASE);
    assert_eq!(expected, plain);

    for step in [1usize, 3, 16, 64, 255] {
        let mut reader = MessageReader::new(passphrase(TEST_PASSPHRASE));
        let mut produced = Vec::new();
        let mut chunks = encrypted.chunks(step).peekable();

        while let Some(chunk) = chunks.next() {
            let mut buf = chunk.to_vec();
            if chunks.peek().is_some() {
                reader.update(&mut buf).unwrap();
            } else {
                reader.finish(&mut buf).unwrap();
            }
            produced.extend_from_slice(&buf);
        }

        assert_eq!(produced, plain, "step {step}");
    }
}

#[test]
fn update_holds_back_the_trailer() {
    let encrypted = encrypt_to_vec(b"0123456789abcdef0123456789abcdef", TEST_PASSPHRASE);

    let mut reader = MessageReader::new(passphrase(TEST_PASSPHRASE));
    let mut buf = encrypted.clone();
    reader.update(&mut buf).unwrap();

    // Whatever update produced, the final block and trailer stay inside.
    assert!(buf.len() + 48 <= encrypted.len());

    let mut rest = Vec::new();
    reader.finish(&mut rest).unwrap();
    buf.extend_from_slice(&rest);
    assert_eq!(buf, b"0123456789abcdef0123456789abcdef");
}

#[test]
fn wrong_passphrase_fails_authentication() {
    let encrypted = encrypt_to_vec(b"secret", TEST_PASSPHRASE);

    let mut reader = MessageReader::new(passphrase("wrong"));
    let mut buf = encrypted;
    let err = reader.finish(&mut buf).unwrap_err();
    assert!(matches!(err, WadcryptError::Crypto(_)));
}

#[test]
fn corrupted_ciphertext_fails_authentication() {
    let mut encrypted = encrypt_to_vec(b"tamper with me", TEST_PASSPHRASE);
    let mid = encrypted.len() / 2;
    encrypted[mid] ^= 0x01;

    let mut reader = MessageReader::new(passphrase(TEST_PASSPHRASE));
    let mut buf = encrypted;
    let err = reader.finish(&mut buf).unwrap_err();
    assert!(matches!(err, WadcryptError::Crypto(_)));
}

#[test]
fn truncated_stream_is_a_header_error() {
    let encrypted = encrypt_to_vec(b"truncate me", TEST_PASSPHRASE);

    // Cut inside the trailer.
    let mut reader = MessageReader::new(passphrase(TEST_PASSPHRASE));
    let mut buf = encrypted[..encrypted.len() - 5].to_vec();
    assert!(matches!(
        reader.finish(&mut buf),
        Err(WadcryptError::Header(_))
    ));

    // Cut inside the envelope header.
    let mut reader = MessageReader::new(passphrase(TEST_PASSPHRASE));
    let mut buf = encrypted[..10].to_vec();
    assert!(matches!(
        reader.finish(&mut buf),
        Err(WadcryptError::Header(_))
    ));
}

#[test]
fn finish_is_terminal() {
    let encrypted = encrypt_to_vec(b"once", TEST_PASSPHRASE);

    let mut reader = MessageReader::new(passphrase(TEST_PASSPHRASE));
    let mut buf = encrypted;
    reader.finish(&mut buf).unwrap();

    let mut again = Vec::new();
    assert!(matches!(
        reader.finish(&mut again),
        Err(WadcryptError::Crypto(_))
    ));
    assert!(matches!(
        reader.update(&mut again),
        Err(WadcryptError::Crypto(_))
    ));
}
